//! Font program reconstruction.
//!
//! This module rebuilds glyph tables and metrics from font dictionaries:
//! single-byte encodings, ToUnicode CMaps, width arrays, descriptor metrics
//! and embedded font file selection.

pub mod cmap;
pub mod embedded;
pub mod encoding;
pub mod metrics;
pub mod program;
pub mod widths;

pub use cmap::{parse_tounicode_cmap, CMap, CidToUnicode, ToUnicodeCMap};
pub use embedded::{select_font_file, EmbeddedFontFile, FontFileKind};
pub use encoding::{glyph_name_to_unicode, FontEncoding, SingleByteEncoding};
pub use metrics::{fill_from_descriptor, BoundingBox, FontFlags, FontMetrics};
pub use program::{
    FixedNameGenerator, FontProgram, FontSource, Glyph, NameGenerator, RandomNameGenerator,
};
pub use widths::{composite_widths, simple_widths, CidWidths};
