//! Font programs rebuilt from font dictionaries.
//!
//! When no usable font file is at hand, everything needed to measure and
//! re-encode text still lives in the document: widths in `/Widths` or `/W`,
//! Unicode identity in the encoding or the ToUnicode CMap, and typographic
//! metrics in the font descriptor. [`FontProgram::build`] gathers those into
//! one read-only value.
//!
//! Two addressing models are supported:
//!
//! - simple fonts: byte codes 0 to 255, one glyph per code
//! - composite (CID-keyed) fonts: sparse CIDs, with CID 0 always present as
//!   the notdef glyph

use crate::config::FontLoaderOptions;
use crate::error::{Error, Result};
use crate::fonts::cmap::{CidToUnicode, ToUnicodeCMap};
use crate::fonts::embedded::{select_font_file, EmbeddedFontFile};
use crate::fonts::encoding::{FontEncoding, SingleByteEncoding};
use crate::fonts::metrics::{fill_from_descriptor, FontMetrics};
use crate::fonts::widths::{composite_widths, simple_widths, CidWidths};
use crate::object::{Dict, DictExt};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// A glyph: code, advance width in 1/1000 em, and Unicode identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Glyph {
    /// Byte code (simple fonts) or CID (composite fonts)
    pub code: u32,
    /// Advance width in glyph space units
    pub width: i32,
    /// Unicode code point, if known
    pub unicode: Option<u32>,
}

impl Glyph {
    /// Create a glyph.
    pub fn new(code: u32, width: i32, unicode: Option<u32>) -> Self {
        Self { code, width, unicode }
    }

    /// The glyph's Unicode identity as a `char`.
    pub fn char(&self) -> Option<char> {
        self.unicode.and_then(char::from_u32)
    }
}

/// The collaborator that decides how a font program is built.
#[derive(Clone, Copy)]
pub enum FontSource<'a> {
    /// Single-byte font with this encoding.
    Simple(&'a dyn SingleByteEncoding),
    /// CID-keyed font with this CID to Unicode mapping.
    Composite(&'a dyn CidToUnicode),
}

/// Supplies names for fonts that declare no `/BaseFont`.
pub trait NameGenerator {
    /// A fresh font name.
    fn generate(&self) -> String;
}

/// Random `FONT_XXXXXX` names from v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNameGenerator;

impl NameGenerator for RandomNameGenerator {
    fn generate(&self) -> String {
        let id = Uuid::new_v4();
        let letters: String = id
            .as_bytes()
            .iter()
            .take(6)
            .map(|b| (b'A' + b % 26) as char)
            .collect();
        format!("FONT_{}", letters)
    }
}

/// Always the same name. Useful for reproducible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNameGenerator(String);

impl FixedNameGenerator {
    /// Generator returning `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl NameGenerator for FixedNameGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Stand-in mapping for Type0 fonts without a `/ToUnicode` stream.
struct MissingToUnicode;

impl CidToUnicode for MissingToUnicode {
    fn direct_mapping(&self) -> Result<IndexMap<u32, u32>> {
        Err(Error::CMapDecode("font has no /ToUnicode stream".to_string()))
    }
}

/// Glyph tables of a font program.
#[derive(Debug, Default)]
struct GlyphTables {
    by_code: BTreeMap<u32, Glyph>,
    by_unicode: HashMap<u32, Glyph>,
}

impl GlyphTables {
    fn insert(&mut self, glyph: Glyph) {
        self.by_code.insert(glyph.code, glyph);
        if let Some(unicode) = glyph.unicode {
            self.by_unicode.insert(unicode, glyph);
        }
    }
}

/// A font program reconstructed from a font dictionary.
///
/// # Examples
///
/// ```
/// use pdf_docfont::config::FontLoaderOptions;
/// use pdf_docfont::fonts::{FixedNameGenerator, FontEncoding, FontProgram, FontSource};
/// use pdf_docfont::object::{Dict, Object};
///
/// let mut dict = Dict::new();
/// dict.insert("Subtype".to_string(), Object::Name("TrueType".to_string()));
/// dict.insert("FirstChar".to_string(), Object::Integer(65));
/// dict.insert(
///     "Widths".to_string(),
///     Object::Array(vec![Object::Integer(600), Object::Integer(700)]),
/// );
///
/// let encoding = FontEncoding::named("WinAnsiEncoding");
/// let font = FontProgram::build(
///     &dict,
///     FontSource::Simple(&encoding),
///     &FixedNameGenerator::new("F1"),
///     &FontLoaderOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(font.name(), "F1");
/// assert_eq!(font.glyph_count(), 256);
/// assert_eq!(font.text_width("AB"), 1300);
/// ```
#[derive(Debug)]
pub struct FontProgram {
    name: String,
    subtype: Option<String>,
    metrics: FontMetrics,
    embedded_file: Option<EmbeddedFontFile>,
    glyphs: GlyphTables,
    default_width: Option<i32>,
    mapping_failure: Option<Error>,
}

impl FontProgram {
    /// Rebuild a font program from a font dictionary.
    ///
    /// `source` selects the simple or composite glyph table. For composite
    /// fonts `dict` may be either the Type0 font or its descendant CIDFont;
    /// the descriptor and widths are taken from the descendant when there is
    /// one. A failing CID mapping does not fail the build: the program keeps
    /// only the notdef glyph and reports the error through
    /// [`mapping_failure`](Self::mapping_failure).
    ///
    /// # Errors
    ///
    /// A `/FontBBox` with fewer than four entries or non-numeric entries.
    pub fn build(
        dict: &Dict,
        source: FontSource<'_>,
        names: &dyn NameGenerator,
        options: &FontLoaderOptions,
    ) -> Result<Self> {
        let name = match dict.get_name("BaseFont") {
            Some(base_font) => base_font.to_string(),
            None => {
                let generated = names.generate();
                log::debug!("Font has no /BaseFont, using generated name {}", generated);
                generated
            },
        };
        let subtype = dict.get_name("Subtype").map(str::to_string);

        let font_dict = match source {
            FontSource::Simple(_) => dict,
            FontSource::Composite(_) => descendant_font(dict).unwrap_or(dict),
        };
        let descriptor = font_dict.get_dict("FontDescriptor");

        let mut metrics = FontMetrics::default();
        fill_from_descriptor(&mut metrics, descriptor)?;
        let embedded_file = descriptor.and_then(select_font_file);
        if embedded_file.is_none() {
            log::debug!("Font {} has no embedded font file", name);
        }

        let mut program = Self {
            name,
            subtype,
            metrics,
            embedded_file,
            glyphs: GlyphTables::default(),
            default_width: None,
            mapping_failure: None,
        };

        match source {
            FontSource::Simple(encoding) => program.fill_simple(font_dict, encoding),
            FontSource::Composite(mapping) => {
                program.fill_composite(font_dict, descriptor, mapping, options)
            },
        }

        log::debug!(
            "Built font program {} ({} glyphs, {} with Unicode)",
            program.name,
            program.glyphs.by_code.len(),
            program.glyphs.by_unicode.len()
        );
        Ok(program)
    }

    /// Rebuild a font program, picking the glyph source from the dictionary.
    ///
    /// Type0 fonts use their `/ToUnicode` CMap; a missing or undecodable CMap
    /// leaves only the notdef glyph. Every other subtype is a simple font
    /// encoded by its `/Encoding` entry (StandardEncoding when absent).
    pub fn from_font_dict(
        dict: &Dict,
        names: &dyn NameGenerator,
        options: &FontLoaderOptions,
    ) -> Result<Self> {
        if dict.get_name("Subtype") == Some("Type0") {
            return match dict.get_stream("ToUnicode") {
                Some(stream) => {
                    let cmap = ToUnicodeCMap::from_stream(stream).with_options(*options);
                    Self::build(dict, FontSource::Composite(&cmap), names, options)
                },
                None => Self::build(dict, FontSource::Composite(&MissingToUnicode), names, options),
            };
        }

        let encoding = FontEncoding::from_object(dict.get("Encoding"));
        Self::build(dict, FontSource::Simple(&encoding), names, options)
    }

    fn fill_simple(&mut self, dict: &Dict, encoding: &dyn SingleByteEncoding) {
        let first_char = dict.get_int("FirstChar").map_or(0, |c| c.max(0) as i64);
        let widths = simple_widths(dict.get_array("Widths"), first_char);

        for (code, &width) in widths.iter().enumerate() {
            let code = code as u8;
            self.glyphs
                .insert(Glyph::new(code as u32, width, encoding.unicode_of(code)));
        }
    }

    fn fill_composite(
        &mut self,
        dict: &Dict,
        descriptor: Option<&Dict>,
        mapping: &dyn CidToUnicode,
        options: &FontLoaderOptions,
    ) {
        let dw = descriptor
            .and_then(|d| d.get_int("DW"))
            .or_else(|| dict.get_int("DW"))
            .unwrap_or(options.default_cid_width);
        self.default_width = Some(dw);

        match mapping.direct_mapping() {
            Ok(cid_to_unicode) => {
                let widths = dict
                    .get_array("W")
                    .or_else(|| dict.get_array("Widths"))
                    .map(|array| composite_widths(array, options.max_cid_range))
                    .unwrap_or_else(CidWidths::new);

                for (&cid, &unicode) in &cid_to_unicode {
                    let width = widths.get(cid).unwrap_or(dw);
                    self.glyphs.insert(Glyph::new(cid, width, Some(unicode)));
                }
            },
            Err(e) => {
                log::warn!("Font {}: CID to Unicode mapping unavailable: {}", self.name, e);
                self.mapping_failure = Some(e);
            },
        }

        self.glyphs
            .by_code
            .entry(0)
            .or_insert_with(|| Glyph::new(0, dw, None));
    }

    /// Glyph for a byte code or CID.
    pub fn glyph(&self, code: u32) -> Option<&Glyph> {
        self.glyphs.by_code.get(&code)
    }

    /// Glyph carrying the given Unicode code point.
    ///
    /// When several codes share a code point the one added last is returned.
    pub fn glyph_by_unicode(&self, unicode: u32) -> Option<&Glyph> {
        self.glyphs.by_unicode.get(&unicode)
    }

    /// All glyphs in code order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.by_code.values()
    }

    /// Number of codes with a glyph.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.by_code.len()
    }

    /// Number of distinct Unicode code points with a glyph.
    pub fn unicode_count(&self) -> usize {
        self.glyphs.by_unicode.len()
    }

    /// Width of a code, 0 when the code has no glyph.
    pub fn width(&self, code: u32) -> i32 {
        self.glyph(code).map_or(0, |g| g.width)
    }

    /// Total advance of `text` in glyph space units.
    ///
    /// Characters without a glyph count as the notdef glyph (code 0), or 0
    /// when there is none.
    pub fn text_width(&self, text: &str) -> i64 {
        let notdef = self.width(0) as i64;
        text.chars()
            .map(|c| {
                self.glyph_by_unicode(c as u32)
                    .map_or(notdef, |g| g.width as i64)
            })
            .sum()
    }

    /// Typographic metrics from the descriptor.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// The embedded font file, if the descriptor references one.
    pub fn embedded_file(&self) -> Option<&EmbeddedFontFile> {
        self.embedded_file.as_ref()
    }

    /// `/Subtype` of the font dictionary.
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// `/BaseFont`, or the generated name when absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this program was built from a CID mapping.
    pub fn is_composite(&self) -> bool {
        self.default_width.is_some()
    }

    /// Width of CIDs without an explicit width. `None` for simple fonts.
    pub fn default_width(&self) -> Option<i32> {
        self.default_width
    }

    /// Why the CID mapping could not be used, if it failed.
    pub fn mapping_failure(&self) -> Option<&Error> {
        self.mapping_failure.as_ref()
    }
}

/// First entry of `/DescendantFonts`.
fn descendant_font(dict: &Dict) -> Option<&Dict> {
    dict.get_array("DescendantFonts")?.first()?.as_dict()
}
