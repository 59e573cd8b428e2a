//! Integration tests for font descriptor handling.
//!
//! Per PDF Spec ISO 32000-1:2008, Section 9.8:
//! - Every metric is optional
//! - /FontBBox is a rectangle that writers do not always normalize
//! - At most one of /FontFile, /FontFile2, /FontFile3 is expected

use bytes::Bytes;
use pdf_docfont::config::FontLoaderOptions;
use pdf_docfont::fonts::{
    BoundingBox, FixedNameGenerator, FontFileKind, FontMetrics, FontProgram,
};
use pdf_docfont::object::{Dict, Object};
use pdf_docfont::Error;

fn font_with_descriptor(descriptor: Dict) -> Dict {
    let mut font = Dict::new();
    font.insert("Subtype".to_string(), Object::Name("TrueType".to_string()));
    font.insert("BaseFont".to_string(), Object::Name("Arial,Bold".to_string()));
    font.insert("FontDescriptor".to_string(), Object::Dictionary(descriptor));
    font
}

fn load(font: &Dict) -> Result<FontProgram, Error> {
    FontProgram::from_font_dict(font, &FixedNameGenerator::new("FONT_X"), &FontLoaderOptions::default())
}

fn font_file(payload: &'static [u8]) -> Object {
    Object::Stream {
        dict: Dict::new(),
        data: Bytes::from_static(payload),
    }
}

fn numbers(values: &[i64]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Integer(v)).collect())
}

#[test]
fn test_flipped_bbox_is_normalized_per_axis() {
    let mut descriptor = Dict::new();
    descriptor.insert("FontBBox".to_string(), numbers(&[100, 800, 0, -200]));

    let program = load(&font_with_descriptor(descriptor)).unwrap();
    assert_eq!(program.metrics().bbox, Some(BoundingBox::new(0, -200, 100, 800)));
}

#[test]
fn test_flags_decoding() {
    let mut descriptor = Dict::new();
    descriptor.insert("Flags".to_string(), Object::Integer(262145));
    let program = load(&font_with_descriptor(descriptor)).unwrap();
    assert!(program.metrics().fixed_pitch);
    assert!(program.metrics().bold);

    let mut descriptor = Dict::new();
    descriptor.insert("Flags".to_string(), Object::Integer(0));
    let program = load(&font_with_descriptor(descriptor)).unwrap();
    assert!(!program.metrics().fixed_pitch);
    assert!(!program.metrics().bold);
}

#[test]
fn test_no_descriptor_leaves_defaults() {
    let mut font = Dict::new();
    font.insert("Subtype".to_string(), Object::Name("Type1".to_string()));
    let program = load(&font).unwrap();

    assert_eq!(program.metrics(), &FontMetrics::default());
    assert!(program.embedded_file().is_none());
}

#[test]
fn test_embedded_file_priority() {
    let mut descriptor = Dict::new();
    descriptor.insert("FontFile2".to_string(), font_file(b"true"));
    descriptor.insert("FontFile".to_string(), font_file(b"type1"));
    descriptor.insert("FontFile3".to_string(), font_file(b"cff"));

    let program = load(&font_with_descriptor(descriptor)).unwrap();
    let file = program.embedded_file().unwrap();
    assert_eq!(file.kind(), FontFileKind::FontFile);
    assert_eq!(file.data(0).unwrap(), b"type1");
}

#[test]
fn test_embedded_truetype() {
    let mut descriptor = Dict::new();
    descriptor.insert("FontFile2".to_string(), font_file(b"\x00\x01\x00\x00"));

    let program = load(&font_with_descriptor(descriptor)).unwrap();
    let file = program.embedded_file().unwrap();
    assert_eq!(file.kind(), FontFileKind::FontFile2);
    assert_eq!(file.kind().key(), "FontFile2");
}

#[test]
fn test_short_bbox_is_fatal() {
    let mut descriptor = Dict::new();
    descriptor.insert("FontBBox".to_string(), numbers(&[0, -200, 1000]));

    let result = load(&font_with_descriptor(descriptor));
    assert!(matches!(result, Err(Error::MalformedBBox(3))));
}

#[test]
fn test_non_numeric_bbox_is_fatal() {
    let mut descriptor = Dict::new();
    descriptor.insert(
        "FontBBox".to_string(),
        Object::Array(vec![
            Object::Integer(0),
            Object::Null,
            Object::Integer(1000),
            Object::Integer(900),
        ]),
    );

    let result = load(&font_with_descriptor(descriptor));
    assert!(matches!(result, Err(Error::InvalidObjectType { .. })));
}

#[test]
fn test_text_string_family() {
    let mut descriptor = Dict::new();
    // UTF-16BE with BOM
    descriptor.insert(
        "FontFamily".to_string(),
        Object::String(vec![0xFE, 0xFF, 0x00, b'A', 0x00, b'r', 0x00, b'i', 0x00, b'a', 0x00, b'l']),
    );
    descriptor.insert("FontStretch".to_string(), Object::Name("Normal".to_string()));
    descriptor.insert("FontWeight".to_string(), Object::Integer(700));

    let program = load(&font_with_descriptor(descriptor)).unwrap();
    let metrics = program.metrics();
    assert_eq!(metrics.family.as_deref(), Some("Arial"));
    assert_eq!(metrics.width_class.as_deref(), Some("Normal"));
    assert_eq!(metrics.font_weight, Some(700));
}

#[test]
fn test_metrics_json() {
    let mut descriptor = Dict::new();
    descriptor.insert("Ascent".to_string(), Object::Integer(905));
    descriptor.insert("FontBBox".to_string(), numbers(&[-665, -325, 2000, 1040]));

    let program = load(&font_with_descriptor(descriptor)).unwrap();
    let json = serde_json::to_value(program.metrics()).unwrap();
    assert_eq!(json["ascender"], 905);
    assert_eq!(json["bbox"]["llx"], -665);
    assert_eq!(json["fixed_pitch"], false);

    let glyph = serde_json::to_value(program.glyph(0x41).unwrap()).unwrap();
    assert_eq!(glyph["code"], 65);
    assert_eq!(glyph["unicode"], 65);
}
