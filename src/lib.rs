// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]

//! # PDF DocFont
//!
//! Rebuilds usable font programs from PDF font dictionaries.
//!
//! A PDF consumer that needs to measure or re-encode text often has no font
//! file to work from. Everything required still lives in the document: glyph
//! widths (`/Widths`, `/W`), Unicode identity (`/Encoding`, `/ToUnicode`) and
//! typographic metrics (`/FontDescriptor`). This crate turns an already
//! resolved font dictionary into a read-only [`FontProgram`].
//!
//! ## Features
//!
//! - **Simple fonts**: 256-entry glyph table from `/FirstChar`, `/Widths` and
//!   a single-byte encoding (Standard, WinAnsi, MacRoman, PDFDoc, `/Differences`)
//! - **Composite fonts**: sparse CID table from a ToUnicode CMap and the `/W`
//!   array, with `DW` defaulting and a guaranteed notdef glyph
//! - **Descriptor metrics**: ascent, descent, cap height, stems, weight,
//!   normalized bounding box, fixed-pitch and bold flags
//! - **Embedded font files**: `/FontFile`, `/FontFile2`, `/FontFile3` by priority
//! - **Observable failures**: an undecodable CMap degrades the font but is
//!   kept for the caller to inspect
//!
//! ## Quick Start
//!
//! ```
//! use pdf_docfont::config::FontLoaderOptions;
//! use pdf_docfont::fonts::{FontProgram, RandomNameGenerator};
//! use pdf_docfont::object::{Dict, Object};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut font = Dict::new();
//! font.insert("BaseFont".to_string(), Object::Name("Helvetica".to_string()));
//! font.insert("Subtype".to_string(), Object::Name("Type1".to_string()));
//! font.insert("Encoding".to_string(), Object::Name("WinAnsiEncoding".to_string()));
//!
//! let program = FontProgram::from_font_dict(&font, &RandomNameGenerator, &FontLoaderOptions::default())?;
//! assert_eq!(program.name(), "Helvetica");
//! assert_eq!(program.glyph_by_unicode('A' as u32).map(|g| g.code), Some(65));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0
//! * MIT license
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Loader options
pub mod config;

// PDF object model
pub mod object;

// Stream decoders
pub mod decoders;

// Font reconstruction
pub mod fonts;

// Re-exports
pub use config::FontLoaderOptions;
pub use error::{Error, Result};
pub use fonts::{FontProgram, FontSource, Glyph};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_docfont");
    }
}
