//! Integration tests for composite (CID-keyed) font programs.
//!
//! Type0 fonts get their Unicode identity from the /ToUnicode CMap and
//! their widths from the descendant CIDFont's /W array. These tests cover:
//! - CMap streams (plain, FlateDecode, ASCIIHexDecode)
//! - DW defaulting and the CID 0 notdef glyph
//! - Graceful degradation when the CMap cannot be decoded

use bytes::Bytes;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use pdf_docfont::config::FontLoaderOptions;
use pdf_docfont::fonts::{FixedNameGenerator, FontProgram, FontSource, Glyph, ToUnicodeCMap};
use pdf_docfont::object::{Dict, Object};
use pdf_docfont::Error;
use std::io::Write;

const CMAP: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfchar
<0003> <4E2D>
<0005> <6587>
endbfchar
1 beginbfrange
<0010> <0012> <0061>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn name(value: &str) -> Object {
    Object::Name(value.to_string())
}

fn ints(values: &[i64]) -> Vec<Object> {
    values.iter().map(|&v| Object::Integer(v)).collect()
}

fn stream(filter: Option<&str>, data: Vec<u8>) -> Object {
    let mut dict = Dict::new();
    if let Some(filter) = filter {
        dict.insert("Filter".to_string(), name(filter));
    }
    dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
    Object::Stream {
        dict,
        data: Bytes::from(data),
    }
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn type0_font(to_unicode: Option<Object>, w: Vec<Object>) -> Dict {
    let mut descriptor = Dict::new();
    descriptor.insert("FontName".to_string(), name("SimSun"));
    descriptor.insert("Ascent".to_string(), Object::Integer(859));
    descriptor.insert("Descent".to_string(), Object::Integer(-141));
    descriptor.insert("Flags".to_string(), Object::Integer(4));

    let mut cid_font = Dict::new();
    cid_font.insert("Type".to_string(), name("Font"));
    cid_font.insert("Subtype".to_string(), name("CIDFontType2"));
    cid_font.insert("BaseFont".to_string(), name("SimSun"));
    cid_font.insert("FontDescriptor".to_string(), Object::Dictionary(descriptor));
    cid_font.insert("W".to_string(), Object::Array(w));

    let mut font = Dict::new();
    font.insert("Type".to_string(), name("Font"));
    font.insert("Subtype".to_string(), name("Type0"));
    font.insert("BaseFont".to_string(), name("SimSun"));
    font.insert("Encoding".to_string(), name("Identity-H"));
    font.insert(
        "DescendantFonts".to_string(),
        Object::Array(vec![Object::Dictionary(cid_font)]),
    );
    if let Some(to_unicode) = to_unicode {
        font.insert("ToUnicode".to_string(), to_unicode);
    }
    font
}

fn load(font: &Dict) -> FontProgram {
    FontProgram::from_font_dict(font, &FixedNameGenerator::new("FONT_X"), &FontLoaderOptions::default())
        .unwrap()
}

#[test]
fn test_type0_with_flate_tounicode() {
    init_logging();
    let font = type0_font(
        Some(stream(Some("FlateDecode"), zlib(CMAP))),
        vec![Object::Integer(5), Object::Array(ints(&[500]))],
    );
    let program = load(&font);

    assert!(program.is_composite());
    assert_eq!(program.subtype(), Some("Type0"));
    assert_eq!(program.name(), "SimSun");
    assert_eq!(program.glyph(3), Some(&Glyph::new(3, 1000, Some(0x4E2D))));
    assert_eq!(program.glyph(5), Some(&Glyph::new(5, 500, Some(0x6587))));
    assert_eq!(program.glyph(0x11), Some(&Glyph::new(0x11, 1000, Some('b' as u32))));
    assert_eq!(program.glyph(0), Some(&Glyph::new(0, 1000, None)));
    // 2 bfchar + 3 bfrange + notdef
    assert_eq!(program.glyph_count(), 6);
    assert_eq!(program.metrics().ascender, Some(859));
    assert!(program.mapping_failure().is_none());
}

#[test]
fn test_type0_with_ascii_hex_tounicode() {
    let hex: Vec<u8> = CMAP
        .iter()
        .flat_map(|b| format!("{:02X}", b).into_bytes())
        .chain(b">".iter().copied())
        .collect();
    let font = type0_font(Some(stream(Some("ASCIIHexDecode"), hex)), vec![]);
    let program = load(&font);

    assert_eq!(program.glyph_by_unicode(0x6587).map(|g| g.code), Some(5));
}

#[test]
fn test_type0_range_widths() {
    let font = type0_font(
        Some(stream(None, CMAP.to_vec())),
        ints(&[0x10, 0x12, 600, 3, 3, 950]),
    );
    let program = load(&font);

    assert_eq!(program.width(0x10), 600);
    assert_eq!(program.width(0x12), 600);
    assert_eq!(program.width(3), 950);
    assert_eq!(program.text_width("ab中"), 600 + 600 + 950);
}

#[test]
fn test_type0_corrupt_tounicode_degrades() {
    init_logging();
    let font = type0_font(
        Some(stream(Some("FlateDecode"), vec![0x06, 0x07, 0x08, 0x09])),
        vec![Object::Integer(5), Object::Array(ints(&[500]))],
    );
    let program = load(&font);

    assert_eq!(program.glyph_count(), 1);
    assert_eq!(program.glyph(0), Some(&Glyph::new(0, 1000, None)));
    assert_eq!(program.unicode_count(), 0);
    assert!(matches!(program.mapping_failure(), Some(Error::CMapDecode(_))));
}

#[test]
fn test_type0_malformed_cmap_degrades() {
    let font = type0_font(
        Some(stream(None, b"beginbfchar\n<0003> <4E2D>\n".to_vec())),
        vec![],
    );
    let program = load(&font);

    assert_eq!(program.glyph_count(), 1);
    assert!(program.mapping_failure().is_some());
}

#[test]
fn test_type0_missing_tounicode_degrades() {
    let font = type0_font(None, vec![]);
    let program = load(&font);

    assert_eq!(program.glyph_count(), 1);
    assert!(program.mapping_failure().is_some());
}

#[test]
fn test_strict_options_reject_short_range_array() {
    let cmap = b"beginbfrange\n<0001> <0003> [<0041> <0042>]\nendbfrange".to_vec();
    let font = type0_font(Some(stream(None, cmap)), vec![]);

    let lenient = load(&font);
    assert_eq!(lenient.glyph_count(), 3);

    let strict = FontProgram::from_font_dict(
        &font,
        &FixedNameGenerator::new("FONT_X"),
        &FontLoaderOptions::strict(),
    )
    .unwrap();
    assert_eq!(strict.glyph_count(), 1);
    assert!(strict.mapping_failure().is_some());
}

#[test]
fn test_custom_default_cid_width() {
    let font = type0_font(Some(stream(None, CMAP.to_vec())), vec![]);
    let options = FontLoaderOptions::default().with_default_cid_width(500);
    let program =
        FontProgram::from_font_dict(&font, &FixedNameGenerator::new("FONT_X"), &options).unwrap();

    assert_eq!(program.default_width(), Some(500));
    assert_eq!(program.width(3), 500);
    assert_eq!(program.width(0), 500);
}

#[test]
fn test_explicit_mapping_source() {
    let cmap = ToUnicodeCMap::from_bytes(CMAP);
    let font = type0_font(None, vec![]);
    let program = FontProgram::build(
        &font,
        FontSource::Composite(&cmap),
        &FixedNameGenerator::new("FONT_X"),
        &FontLoaderOptions::default(),
    )
    .unwrap();
    assert_eq!(program.glyph_count(), 6);

    let mut shared = IndexMap::new();
    shared.insert(7u32, 0x41u32);
    shared.insert(9u32, 0x41u32);
    let program = FontProgram::build(
        &font,
        FontSource::Composite(&shared),
        &FixedNameGenerator::new("FONT_X"),
        &FontLoaderOptions::default(),
    )
    .unwrap();
    // later CID wins the reverse lookup
    assert_eq!(program.glyph_by_unicode(0x41).map(|g| g.code), Some(9));
    assert_eq!(program.glyph(7).and_then(|g| g.unicode), Some(0x41));
}
