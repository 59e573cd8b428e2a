//! Embedded font file selection.
//!
//! A descriptor references at most one font program stream:
//! `/FontFile` (Type 1), `/FontFile2` (TrueType) or `/FontFile3`
//! (CFF/OpenType, refined by the stream's `/Subtype`).

use crate::error::{Error, Result};
use crate::object::{Dict, DictExt, Object};
use serde::Serialize;

/// Which descriptor key the embedded font file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFileKind {
    /// `/FontFile`: Type 1 font program
    FontFile,
    /// `/FontFile2`: TrueType font program
    FontFile2,
    /// `/FontFile3`: program format given by the stream's `/Subtype`
    FontFile3,
}

impl FontFileKind {
    /// Descriptor keys in selection order.
    pub const PRIORITY: [FontFileKind; 3] =
        [FontFileKind::FontFile, FontFileKind::FontFile2, FontFileKind::FontFile3];

    /// The descriptor key for this kind.
    pub fn key(self) -> &'static str {
        match self {
            FontFileKind::FontFile => "FontFile",
            FontFileKind::FontFile2 => "FontFile2",
            FontFileKind::FontFile3 => "FontFile3",
        }
    }
}

/// The font file stream a descriptor points at.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedFontFile {
    kind: FontFileKind,
    stream: Option<Object>,
}

impl EmbeddedFontFile {
    /// Which key the file was found under.
    pub fn kind(&self) -> FontFileKind {
        self.kind
    }

    /// The stream object, if the key held a stream.
    pub fn stream(&self) -> Option<&Object> {
        self.stream.as_ref()
    }

    /// `/Subtype` of a `/FontFile3` stream (e.g. `Type1C`, `CIDFontType0C`, `OpenType`).
    pub fn subtype(&self) -> Option<&str> {
        self.stream
            .as_ref()
            .and_then(Object::as_dict)
            .and_then(|dict| dict.get_name("Subtype"))
    }

    /// Decoded font program bytes.
    pub fn data(&self, max_size: usize) -> Result<Vec<u8>> {
        match &self.stream {
            Some(stream) => stream.decode_stream_data(max_size),
            None => Err(Error::Font(format!("{} entry is not a stream", self.kind.key()))),
        }
    }
}

/// Pick the embedded font file, `/FontFile` first, then `/FontFile2`,
/// then `/FontFile3`.
///
/// The first key present wins even when it does not hold a stream; later
/// keys are never consulted.
pub fn select_font_file(descriptor: &Dict) -> Option<EmbeddedFontFile> {
    let kind = FontFileKind::PRIORITY
        .into_iter()
        .find(|kind| descriptor.has_key(kind.key()))?;

    let stream = descriptor.get_stream(kind.key()).cloned();
    if stream.is_none() {
        log::warn!("/{} present but not a stream", kind.key());
    }
    log::debug!("Embedded font file: /{}", kind.key());

    Some(EmbeddedFontFile { kind, stream })
}
