//! ToUnicode CMap decoding.
//!
//! Composite fonts recover the Unicode meaning of their CIDs from the
//! `/ToUnicode` CMap stream. The stream is a small PostScript-like program;
//! only the `bfchar` and `bfrange` sections matter here:
//!
//! ```text
//! beginbfchar
//! <0041> <0041>             % CID 0x41 -> U+0041
//! <000C> <00660069>         % CID 0x0C -> "fi"
//! endbfchar
//!
//! beginbfrange
//! <0020> <007E> <0020>      % sequential
//! <005F> <0061> [<00660066> <00660069> <00660066006C>]
//! endbfrange
//! ```
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.10.3

use crate::config::FontLoaderOptions;
use crate::decoders::ascii_hex::hex_value;
use crate::error::{Error, Result};
use crate::object::Object;
use indexmap::IndexMap;
use regex::Regex;

/// Character code to Unicode string mapping, in CMap source order.
///
/// Values may hold more than one character (ligatures such as "fi").
pub type CMap = IndexMap<u32, String>;

/// A fallible source of CID to Unicode code point mappings.
///
/// The returned map keeps source order; when two CIDs share a code point the
/// later one is the one a reverse lookup should keep.
pub trait CidToUnicode {
    /// Decode the complete CID to code point mapping.
    fn direct_mapping(&self) -> Result<IndexMap<u32, u32>>;
}

impl CidToUnicode for IndexMap<u32, u32> {
    fn direct_mapping(&self) -> Result<IndexMap<u32, u32>> {
        Ok(self.clone())
    }
}

/// Where the CMap program comes from.
#[derive(Debug, Clone, Copy)]
enum CMapSource<'a> {
    Bytes(&'a [u8]),
    Stream(&'a Object),
}

/// An undecoded ToUnicode CMap.
///
/// Decoding is deferred to [`CidToUnicode::direct_mapping`], so a broken
/// stream only fails the mapping, not the code holding the CMap.
#[derive(Debug, Clone, Copy)]
pub struct ToUnicodeCMap<'a> {
    source: CMapSource<'a>,
    options: FontLoaderOptions,
}

impl<'a> ToUnicodeCMap<'a> {
    /// CMap program given as already-decoded bytes.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self {
            source: CMapSource::Bytes(data),
            options: FontLoaderOptions::default(),
        }
    }

    /// CMap program held in a (possibly filtered) stream object.
    pub fn from_stream(stream: &'a Object) -> Self {
        Self {
            source: CMapSource::Stream(stream),
            options: FontLoaderOptions::default(),
        }
    }

    /// Use the given options for limits and strictness.
    pub fn with_options(mut self, options: FontLoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Decode the full mapping, ligature entries included.
    pub fn decode(&self) -> Result<CMap> {
        match self.source {
            CMapSource::Bytes(data) => parse_tounicode_cmap_with_options(data, &self.options),
            CMapSource::Stream(stream) => {
                let data = stream
                    .decode_stream_data(self.options.max_stream_size)
                    .map_err(|e| Error::CMapDecode(format!("ToUnicode stream: {}", e)))?;
                parse_tounicode_cmap_with_options(&data, &self.options)
            },
        }
    }
}

impl CidToUnicode for ToUnicodeCMap<'_> {
    fn direct_mapping(&self) -> Result<IndexMap<u32, u32>> {
        let cmap = self.decode()?;
        let mut direct = IndexMap::with_capacity(cmap.len());
        let mut skipped = 0usize;

        for (code, text) in &cmap {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    direct.insert(*code, c as u32);
                },
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!("ToUnicode: {} multi-character mappings left out of direct mapping", skipped);
        }
        Ok(direct)
    }
}

/// Parse a ToUnicode CMap program with default (lenient) options.
///
/// # Examples
///
/// ```
/// use pdf_docfont::fonts::parse_tounicode_cmap;
///
/// let cmap = parse_tounicode_cmap(b"beginbfchar\n<0041> <0041>\nendbfchar").unwrap();
/// assert_eq!(cmap.get(&0x41), Some(&"A".to_string()));
/// ```
pub fn parse_tounicode_cmap(data: &[u8]) -> Result<CMap> {
    parse_tounicode_cmap_with_options(data, &FontLoaderOptions::default())
}

/// Parse a ToUnicode CMap program.
///
/// Sections are processed in the order they appear; a later entry for the
/// same code replaces an earlier one.
pub fn parse_tounicode_cmap_with_options(data: &[u8], options: &FontLoaderOptions) -> Result<CMap> {
    let content = String::from_utf8_lossy(data);
    let mut cmap = CMap::new();

    for (kind, body) in extract_sections(&content)? {
        let tokens = tokenize(body, options)?;
        match kind {
            SectionKind::BfChar => parse_bfchar(&tokens, options, &mut cmap)?,
            SectionKind::BfRange => parse_bfrange(&tokens, options, &mut cmap)?,
        }
    }

    log::trace!("ToUnicode CMap: {} mappings", cmap.len());
    Ok(cmap)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    BfChar,
    BfRange,
}

/// Find every `bfchar`/`bfrange` section body, in document order.
fn extract_sections(content: &str) -> Result<Vec<(SectionKind, &str)>> {
    const MARKERS: [(SectionKind, &str, &str); 2] = [
        (SectionKind::BfChar, "beginbfchar", "endbfchar"),
        (SectionKind::BfRange, "beginbfrange", "endbfrange"),
    ];

    let mut sections = Vec::new();
    let mut remaining = content;

    loop {
        let next = MARKERS
            .iter()
            .filter_map(|&(kind, begin, end)| remaining.find(begin).map(|pos| (pos, kind, begin, end)))
            .min_by_key(|&(pos, ..)| pos);

        let Some((pos, kind, begin, end)) = next else {
            break;
        };

        let after_begin = &remaining[pos + begin.len()..];
        let end_pos = after_begin
            .find(end)
            .ok_or_else(|| Error::CMapDecode(format!("unterminated {} section", begin)))?;
        sections.push((kind, &after_begin[..end_pos]));
        remaining = &after_begin[end_pos + end.len()..];
    }

    Ok(sections)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Hex(Vec<u8>),
    /// A token that could not be read; the entry holding it is dropped.
    Invalid,
    ArrayStart,
    ArrayEnd,
}

/// Fail in strict mode, otherwise log and let the caller drop the entry.
fn skip_entry(options: &FontLoaderOptions, message: String) -> Result<()> {
    if options.strict {
        return Err(Error::CMapDecode(message));
    }
    log::warn!("ToUnicode: {}, entry skipped", message);
    Ok(())
}

/// Split a section body into hex strings and array brackets.
fn tokenize(body: &str, options: &FontLoaderOptions) -> Result<Vec<Token>> {
    lazy_static::lazy_static! {
        static ref RE_TOKEN: Regex = Regex::new(r"<([^<>]*)>|\[|\]|%[^\r\n]*|[^\s<>\[\]%]+").unwrap();
    }

    let mut tokens = Vec::new();
    for caps in RE_TOKEN.captures_iter(body) {
        if let Some(hex) = caps.get(1) {
            match parse_hex(hex.as_str()) {
                Some(bytes) => tokens.push(Token::Hex(bytes)),
                None => {
                    skip_entry(options, format!("invalid hex string <{}>", hex.as_str()))?;
                    tokens.push(Token::Invalid);
                },
            }
            continue;
        }
        match &caps[0] {
            "[" => tokens.push(Token::ArrayStart),
            "]" => tokens.push(Token::ArrayEnd),
            comment if comment.starts_with('%') => {},
            other => {
                skip_entry(options, format!("unexpected token '{}' in CMap section", other))?;
                tokens.push(Token::Invalid);
            },
        }
    }
    Ok(tokens)
}

/// Decode the digits of a hex string; a trailing odd digit is padded with 0.
///
/// `<>` decodes to no bytes. `None` means a non-hex digit.
fn parse_hex(digits: &str) -> Option<Vec<u8>> {
    let mut nibbles = Vec::with_capacity(digits.len());
    for c in digits.bytes().filter(|c| !c.is_ascii_whitespace()) {
        nibbles.push(hex_value(c)?);
    }
    if nibbles.len() % 2 == 1 {
        nibbles.push(0);
    }
    Some(nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Interpret source-code bytes as a big-endian integer of 1 to 4 bytes.
fn code_of(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 4 {
        return None;
    }
    Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Decode a destination string (UTF-16BE per the CMap conventions).
///
/// One- and three-byte values are treated as raw code points, which some
/// writers emit for characters outside the BMP.
fn decode_destination(bytes: &[u8]) -> Option<Vec<char>> {
    if bytes.len() % 2 == 1 {
        let value = bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
        return char::from_u32(value).map(|c| vec![c]);
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    let chars: Vec<char> = char::decode_utf16(units.iter().copied())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    if chars.is_empty() {
        None
    } else {
        Some(chars)
    }
}

/// `<src> <dst>` pairs.
fn parse_bfchar(tokens: &[Token], options: &FontLoaderOptions, cmap: &mut CMap) -> Result<()> {
    let mut iter = tokens.iter();
    while let Some(src) = iter.next() {
        let Some(dst) = iter.next() else {
            return Err(Error::CMapDecode("bfchar entry is not a pair of hex strings".to_string()));
        };
        let (Token::Hex(src), Token::Hex(dst)) = (src, dst) else {
            if !matches!((src, dst), (Token::Invalid, _) | (_, Token::Invalid)) {
                skip_entry(options, "bfchar entry is not a pair of hex strings".to_string())?;
            }
            continue;
        };
        let Some(code) = code_of(src) else {
            skip_entry(options, format!("bfchar source code of {} bytes", src.len()))?;
            continue;
        };
        match decode_destination(dst) {
            Some(chars) => {
                cmap.insert(code, chars.into_iter().collect());
            },
            None => skip_entry(options, format!("bfchar: undecodable destination for code 0x{:X}", code))?,
        }
    }
    Ok(())
}

/// Destination part of a bfrange entry.
enum RangeDestination<'t> {
    Single(&'t Token),
    Array(Vec<&'t Token>),
}

/// `<lo> <hi> <dst>` and `<lo> <hi> [<dst0> <dst1> ...]` entries.
fn parse_bfrange(tokens: &[Token], options: &FontLoaderOptions, cmap: &mut CMap) -> Result<()> {
    let mut i = 0;
    while i < tokens.len() {
        let (Some(lo), Some(hi)) = (tokens.get(i), tokens.get(i + 1)) else {
            return Err(Error::CMapDecode("bfrange entry must start with two codes".to_string()));
        };
        i += 2;

        let destination = match tokens.get(i) {
            Some(Token::ArrayStart) => {
                i += 1;
                let mut destinations = Vec::new();
                loop {
                    match tokens.get(i) {
                        Some(Token::ArrayEnd) => break,
                        Some(dst @ (Token::Hex(_) | Token::Invalid)) => destinations.push(dst),
                        _ => return Err(Error::CMapDecode("unterminated bfrange array".to_string())),
                    }
                    i += 1;
                }
                i += 1;
                RangeDestination::Array(destinations)
            },
            Some(dst @ (Token::Hex(_) | Token::Invalid)) => {
                i += 1;
                RangeDestination::Single(dst)
            },
            _ => return Err(Error::CMapDecode("bfrange entry has no destination".to_string())),
        };

        let (Token::Hex(lo), Token::Hex(hi)) = (lo, hi) else {
            if !matches!((lo, hi), (Token::Invalid, _) | (_, Token::Invalid)) {
                skip_entry(options, "bfrange entry must start with two hex strings".to_string())?;
            }
            continue;
        };
        let (Some(lo), Some(hi)) = (code_of(lo), code_of(hi)) else {
            skip_entry(options, "bfrange source codes must be 1 to 4 bytes".to_string())?;
            continue;
        };
        if hi < lo {
            return Err(Error::CMapDecode(format!("bfrange 0x{:X}-0x{:X} is inverted", lo, hi)));
        }
        if hi - lo > options.max_cid_range {
            return Err(Error::CMapDecode(format!(
                "bfrange 0x{:X}-0x{:X} spans more than {} codes",
                lo, hi, options.max_cid_range
            )));
        }

        match destination {
            RangeDestination::Single(Token::Hex(dst)) => {
                let Some(start) = decode_destination(dst) else {
                    skip_entry(options, format!("bfrange: undecodable destination for 0x{:X}", lo))?;
                    continue;
                };
                for offset in 0..=(hi - lo) {
                    if let Some(text) = increment_last(&start, offset) {
                        cmap.insert(lo + offset, text);
                    }
                }
            },
            RangeDestination::Single(_) => {},
            RangeDestination::Array(destinations) => {
                let range_size = (hi - lo) as usize + 1;
                if destinations.len() != range_size {
                    if options.strict {
                        return Err(Error::CMapDecode(format!(
                            "bfrange 0x{:X}-0x{:X} expects {} destinations, found {}",
                            lo,
                            hi,
                            range_size,
                            destinations.len()
                        )));
                    }
                    log::warn!(
                        "ToUnicode bfrange array size mismatch: expected {} entries for range 0x{:X}-0x{:X}, got {}",
                        range_size,
                        lo,
                        hi,
                        destinations.len()
                    );
                }

                for (offset, dst) in destinations.into_iter().take(range_size).enumerate() {
                    let code = lo + offset as u32;
                    let Token::Hex(dst) = dst else {
                        continue;
                    };
                    match decode_destination(dst) {
                        Some(chars) => {
                            cmap.insert(code, chars.into_iter().collect());
                        },
                        None => skip_entry(
                            options,
                            format!("bfrange: undecodable destination for code 0x{:X}", code),
                        )?,
                    }
                }
            },
        }
    }
    Ok(())
}

/// The destination string for the `offset`-th code of a sequential range:
/// the last character advances, the rest is kept.
fn increment_last(start: &[char], offset: u32) -> Option<String> {
    let (last, prefix) = start.split_last()?;
    let bumped = char::from_u32((*last as u32).checked_add(offset)?)?;
    let mut text: String = prefix.iter().collect();
    text.push(bumped);
    Some(text)
}
