//! Typographic metrics read from a font descriptor.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.8 (Font Descriptors)

use crate::error::{Error, Result};
use crate::object::{Dict, DictExt, Object};
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Font descriptor flags.
    ///
    /// Per PDF spec Table 123 (Font flags).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontFlags: u32 {
        /// Bit 1: All glyphs have the same width
        const FIXED_PITCH = 1 << 0;
        /// Bit 2: Glyphs have serifs
        const SERIF = 1 << 1;
        /// Bit 3: Font uses characters outside the Standard Latin set
        const SYMBOLIC = 1 << 2;
        /// Bit 4: Glyphs resemble cursive handwriting
        const SCRIPT = 1 << 3;
        /// Bit 6: Font uses the Standard Latin character set
        const NONSYMBOLIC = 1 << 5;
        /// Bit 7: Glyphs have dominant vertical strokes that are slanted
        const ITALIC = 1 << 6;
        /// Bit 17: No lowercase letters
        const ALL_CAP = 1 << 16;
        /// Bit 18: Lowercase letters are small capitals
        const SMALL_CAP = 1 << 17;
        /// Bit 19: Bold glyphs are painted with extra pixels at small sizes
        const FORCE_BOLD = 1 << 18;
    }
}

/// Font bounding box in glyph space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    /// Lower-left x
    pub llx: i32,
    /// Lower-left y
    pub lly: i32,
    /// Upper-right x
    pub urx: i32,
    /// Upper-right y
    pub ury: i32,
}

impl BoundingBox {
    /// Create a bounding box without reordering its coordinates.
    pub fn new(llx: i32, lly: i32, urx: i32, ury: i32) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Order each axis so that `llx <= urx` and `lly <= ury`.
    ///
    /// The axes are fixed independently; the four values are not sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_docfont::fonts::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(100, 800, 0, -200).normalized();
    /// assert_eq!(bbox, BoundingBox::new(0, -200, 100, 800));
    /// ```
    pub fn normalized(self) -> Self {
        let (llx, urx) = if self.llx > self.urx {
            (self.urx, self.llx)
        } else {
            (self.llx, self.urx)
        };
        let (lly, ury) = if self.lly > self.ury {
            (self.ury, self.lly)
        } else {
            (self.lly, self.ury)
        };
        Self { llx, lly, urx, ury }
    }

    /// Read a bounding box from the first four entries of a numeric array.
    pub fn from_array(array: &[Object]) -> Result<Self> {
        if array.len() < 4 {
            return Err(Error::MalformedBBox(array.len()));
        }
        let mut coords = [0i32; 4];
        for (slot, obj) in coords.iter_mut().zip(array) {
            *slot = obj.as_int().ok_or_else(|| Error::InvalidObjectType {
                expected: "Number".to_string(),
                found: obj.type_name().to_string(),
            })?;
        }
        let [llx, lly, urx, ury] = coords;
        Ok(Self::new(llx, lly, urx, ury))
    }

    /// Width of the box.
    pub fn width(&self) -> i32 {
        self.urx.saturating_sub(self.llx)
    }

    /// Height of the box.
    pub fn height(&self) -> i32 {
        self.ury.saturating_sub(self.lly)
    }
}

/// Typographic metrics of a font program.
///
/// Every field stays unset unless the descriptor declares it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontMetrics {
    /// Maximum height above the baseline (`/Ascent`)
    pub ascender: Option<i32>,
    /// Maximum depth below the baseline, usually negative (`/Descent`)
    pub descender: Option<i32>,
    /// Height of flat capital letters (`/CapHeight`)
    pub cap_height: Option<i32>,
    /// Height of flat lowercase letters (`/XHeight`)
    pub x_height: Option<i32>,
    /// Angle of dominant vertical strokes in degrees (`/ItalicAngle`)
    pub italic_angle: Option<i32>,
    /// Thickness of dominant vertical stems (`/StemV`)
    pub stem_v: Option<i32>,
    /// Thickness of dominant horizontal stems (`/StemH`)
    pub stem_h: Option<i32>,
    /// Weight class, 100 to 900 (`/FontWeight`)
    pub font_weight: Option<i32>,
    /// Width class name such as `Condensed` (`/FontStretch`)
    pub width_class: Option<String>,
    /// Family name (`/FontFamily`)
    pub family: Option<String>,
    /// Normalized font bounding box (`/FontBBox`)
    pub bbox: Option<BoundingBox>,
    /// All glyphs share one width
    pub fixed_pitch: bool,
    /// Bold glyphs
    pub bold: bool,
}

impl FontMetrics {
    /// Apply descriptor flags. Only fixed pitch and force bold are tracked.
    pub fn apply_flags(&mut self, flags: FontFlags) {
        if flags.contains(FontFlags::FIXED_PITCH) {
            self.fixed_pitch = true;
        }
        if flags.contains(FontFlags::FORCE_BOLD) {
            self.bold = true;
        }
    }
}

/// Copy every metric the descriptor declares into `metrics`.
///
/// Missing or mistyped entries are skipped; an absent descriptor changes
/// nothing. A `/FontBBox` array that is too short or holds non-numbers
/// is an error.
pub fn fill_from_descriptor(metrics: &mut FontMetrics, descriptor: Option<&Dict>) -> Result<()> {
    let Some(descriptor) = descriptor else {
        log::debug!("No font descriptor, metrics left at defaults");
        return Ok(());
    };

    let int_fields: [(&str, &mut Option<i32>); 8] = [
        ("Ascent", &mut metrics.ascender),
        ("Descent", &mut metrics.descender),
        ("CapHeight", &mut metrics.cap_height),
        ("XHeight", &mut metrics.x_height),
        ("ItalicAngle", &mut metrics.italic_angle),
        ("StemV", &mut metrics.stem_v),
        ("StemH", &mut metrics.stem_h),
        ("FontWeight", &mut metrics.font_weight),
    ];
    for (key, field) in int_fields {
        if let Some(value) = descriptor.get_int(key) {
            *field = Some(value);
        }
    }

    if let Some(stretch) = descriptor
        .get_name("FontStretch")
        .map(str::to_string)
        .or_else(|| descriptor.get_string("FontStretch"))
    {
        metrics.width_class = Some(stretch);
    }

    if let Some(family) = descriptor
        .get_string("FontFamily")
        .or_else(|| descriptor.get_name("FontFamily").map(str::to_string))
    {
        metrics.family = Some(family);
    }

    if let Some(array) = descriptor.get_array("FontBBox") {
        metrics.bbox = Some(BoundingBox::from_array(array)?.normalized());
    }

    if let Some(flags) = descriptor.get_int("Flags") {
        metrics.apply_flags(FontFlags::from_bits_truncate(flags as u32));
    }

    Ok(())
}
