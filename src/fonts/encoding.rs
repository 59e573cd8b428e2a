//! Single-byte font encodings.
//!
//! Simple fonts (Type1, TrueType, MMType1) address glyphs with one byte. The
//! font's `/Encoding` entry names a predefined encoding or supplies a
//! dictionary whose `/Differences` array overrides individual codes with
//! glyph names. [`FontEncoding`] resolves all of that into a flat 256-entry
//! table of Unicode scalar values.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.6.6 and Annex D

use crate::object::{DictExt, Object};
use phf::phf_map;

/// Byte code to Unicode lookup used by the simple-font builder.
pub trait SingleByteEncoding {
    /// Unicode code point for `code`, if the encoding defines one.
    fn unicode_of(&self, code: u8) -> Option<u32>;
}

impl<F> SingleByteEncoding for F
where
    F: Fn(u8) -> Option<u32>,
{
    fn unicode_of(&self, code: u8) -> Option<u32> {
        self(code)
    }
}

/// A resolved single-byte encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEncoding {
    base_name: String,
    table: [Option<u32>; 256],
    differences: usize,
}

impl SingleByteEncoding for FontEncoding {
    fn unicode_of(&self, code: u8) -> Option<u32> {
        self.table[code as usize]
    }
}

impl Default for FontEncoding {
    fn default() -> Self {
        Self::named("StandardEncoding")
    }
}

impl FontEncoding {
    /// Build a predefined encoding by name.
    ///
    /// Recognized: StandardEncoding, WinAnsiEncoding, MacRomanEncoding,
    /// PDFDocEncoding. Any other name resolves to StandardEncoding.
    pub fn named(name: &str) -> Self {
        let base_name = match name {
            "WinAnsiEncoding" | "MacRomanEncoding" | "PDFDocEncoding" | "StandardEncoding" => name,
            other => {
                log::debug!("Unknown encoding '{}', using StandardEncoding", other);
                "StandardEncoding"
            },
        };
        let lookup: fn(u8) -> Option<char> = match base_name {
            "WinAnsiEncoding" => win_ansi_lookup,
            "MacRomanEncoding" => mac_roman_lookup,
            "PDFDocEncoding" => pdfdoc_encoding_lookup,
            _ => standard_lookup,
        };

        let mut table = [None; 256];
        for (code, slot) in table.iter_mut().enumerate() {
            *slot = lookup(code as u8).map(|c| c as u32);
        }

        Self {
            base_name: base_name.to_string(),
            table,
            differences: 0,
        }
    }

    /// Identity mapping: code 0xXX is U+00XX for every code from 0x20 up.
    pub fn identity() -> Self {
        let mut table = [None; 256];
        for code in 0x20..=0xFFu32 {
            table[code as usize] = Some(code);
        }
        Self {
            base_name: "Identity".to_string(),
            table,
            differences: 0,
        }
    }

    /// Resolve the value of a font's `/Encoding` entry.
    ///
    /// Handles both named encodings and encoding dictionaries with
    /// `/BaseEncoding` and `/Differences`:
    ///
    /// ```text
    /// /Encoding <<
    ///     /BaseEncoding /WinAnsiEncoding
    ///     /Differences [code1 /name1 /name2 ... codeN /nameN ...]
    /// >>
    /// ```
    ///
    /// A missing or unusable entry yields StandardEncoding.
    pub fn from_object(enc_obj: Option<&Object>) -> Self {
        let Some(enc_obj) = enc_obj else {
            return Self::default();
        };

        if let Some(name) = enc_obj.as_name() {
            return Self::named(name);
        }

        let Some(dict) = enc_obj.as_dict() else {
            log::warn!("Unexpected /Encoding value of type {}", enc_obj.type_name());
            return Self::default();
        };

        let mut encoding = Self::named(dict.get_name("BaseEncoding").unwrap_or("StandardEncoding"));
        if let Some(differences) = dict.get_array("Differences") {
            encoding.apply_differences(differences);
        } else if dict.has_key("Differences") {
            log::warn!("/Differences is not an array");
        }
        encoding
    }

    /// Apply a `/Differences` array on top of the current table.
    ///
    /// An integer sets the next code; each following name assigns a glyph to
    /// that code and advances it by one. Unknown glyph names clear the code.
    pub fn apply_differences(&mut self, differences: &[Object]) {
        let mut current_code: i64 = 0;

        for item in differences {
            match item {
                Object::Integer(code) => current_code = *code,
                Object::Name(glyph_name) => {
                    if (0..=255).contains(&current_code) {
                        let unicode = glyph_name_to_unicode(glyph_name).map(|c| c as u32);
                        if unicode.is_none() {
                            log::debug!(
                                "Unknown glyph name '{}' at code {} in /Differences",
                                glyph_name,
                                current_code
                            );
                        }
                        self.table[current_code as usize] = unicode;
                        self.differences += 1;
                    } else {
                        log::warn!(
                            "Character code {} in /Differences array exceeds byte range",
                            current_code
                        );
                    }
                    current_code += 1;
                },
                _ => log::warn!("Unexpected item in /Differences array: {:?}", item),
            }
        }
    }

    /// Name of the predefined encoding this table starts from.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Number of codes overridden by `/Differences`.
    pub fn difference_count(&self) -> usize {
        self.differences
    }
}

/// Map a glyph name to a Unicode character.
///
/// Tries the glyph list first, then the `uniXXXX` and `uXXXX[XX]` forms.
/// Suffixes after the first period (`a.sc`, `one.oldstyle`) are ignored, and
/// single-letter names map to themselves.
pub fn glyph_name_to_unicode(glyph_name: &str) -> Option<char> {
    let base = glyph_name.split('.').next().unwrap_or(glyph_name);

    if let Some(&c) = GLYPH_LIST.get(base) {
        return Some(c);
    }

    let mut chars = base.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c);
        }
    }

    if let Some(hex) = base.strip_prefix("uni") {
        if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
        }
    }

    if let Some(hex) = base.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
        }
    }

    None
}

/// Glyph names commonly found in `/Differences` arrays.
static GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    "space" => ' ',
    "nbspace" => '\u{00A0}',
    "exclam" => '!',
    "quotedbl" => '"',
    "numbersign" => '#',
    "dollar" => '$',
    "percent" => '%',
    "ampersand" => '&',
    "quotesingle" => '\'',
    "parenleft" => '(',
    "parenright" => ')',
    "asterisk" => '*',
    "plus" => '+',
    "comma" => ',',
    "hyphen" => '-',
    "period" => '.',
    "slash" => '/',
    "zero" => '0',
    "one" => '1',
    "two" => '2',
    "three" => '3',
    "four" => '4',
    "five" => '5',
    "six" => '6',
    "seven" => '7',
    "eight" => '8',
    "nine" => '9',
    "colon" => ':',
    "semicolon" => ';',
    "less" => '<',
    "equal" => '=',
    "greater" => '>',
    "question" => '?',
    "at" => '@',
    "bracketleft" => '[',
    "backslash" => '\\',
    "bracketright" => ']',
    "asciicircum" => '^',
    "underscore" => '_',
    "grave" => '`',
    "braceleft" => '{',
    "bar" => '|',
    "braceright" => '}',
    "asciitilde" => '~',
    "quoteleft" => '\u{2018}',
    "quoteright" => '\u{2019}',
    "quotesinglbase" => '\u{201A}',
    "quotedblleft" => '\u{201C}',
    "quotedblright" => '\u{201D}',
    "quotedblbase" => '\u{201E}',
    "guillemotleft" => '\u{00AB}',
    "guillemotright" => '\u{00BB}',
    "guilsinglleft" => '\u{2039}',
    "guilsinglright" => '\u{203A}',
    "bullet" => '\u{2022}',
    "endash" => '\u{2013}',
    "emdash" => '\u{2014}',
    "ellipsis" => '\u{2026}',
    "dagger" => '\u{2020}',
    "daggerdbl" => '\u{2021}',
    "periodcentered" => '\u{00B7}',
    "perthousand" => '\u{2030}',
    "trademark" => '\u{2122}',
    "copyright" => '\u{00A9}',
    "registered" => '\u{00AE}',
    "degree" => '\u{00B0}',
    "section" => '\u{00A7}',
    "paragraph" => '\u{00B6}',
    "exclamdown" => '\u{00A1}',
    "questiondown" => '\u{00BF}',
    "ordfeminine" => '\u{00AA}',
    "ordmasculine" => '\u{00BA}',
    "cent" => '\u{00A2}',
    "sterling" => '\u{00A3}',
    "currency" => '\u{00A4}',
    "yen" => '\u{00A5}',
    "Euro" => '\u{20AC}',
    "florin" => '\u{0192}',
    "fraction" => '\u{2044}',
    "minus" => '\u{2212}',
    "multiply" => '\u{00D7}',
    "divide" => '\u{00F7}',
    "plusminus" => '\u{00B1}',
    "logicalnot" => '\u{00AC}',
    "fi" => '\u{FB01}',
    "fl" => '\u{FB02}',
    "ff" => '\u{FB00}',
    "ffi" => '\u{FB03}',
    "ffl" => '\u{FB04}',
    "acute" => '\u{00B4}',
    "dieresis" => '\u{00A8}',
    "circumflex" => '\u{02C6}',
    "tilde" => '\u{02DC}',
    "macron" => '\u{00AF}',
    "breve" => '\u{02D8}',
    "dotaccent" => '\u{02D9}',
    "ring" => '\u{02DA}',
    "cedilla" => '\u{00B8}',
    "hungarumlaut" => '\u{02DD}',
    "ogonek" => '\u{02DB}',
    "caron" => '\u{02C7}',
    "germandbls" => '\u{00DF}',
    "dotlessi" => '\u{0131}',
    "AE" => '\u{00C6}',
    "ae" => '\u{00E6}',
    "OE" => '\u{0152}',
    "oe" => '\u{0153}',
    "Oslash" => '\u{00D8}',
    "oslash" => '\u{00F8}',
    "Lslash" => '\u{0141}',
    "lslash" => '\u{0142}',
    "Aacute" => '\u{00C1}',
    "aacute" => '\u{00E1}',
    "Agrave" => '\u{00C0}',
    "agrave" => '\u{00E0}',
    "Acircumflex" => '\u{00C2}',
    "acircumflex" => '\u{00E2}',
    "Adieresis" => '\u{00C4}',
    "adieresis" => '\u{00E4}',
    "Atilde" => '\u{00C3}',
    "atilde" => '\u{00E3}',
    "Aring" => '\u{00C5}',
    "aring" => '\u{00E5}',
    "Ccedilla" => '\u{00C7}',
    "ccedilla" => '\u{00E7}',
    "Eacute" => '\u{00C9}',
    "eacute" => '\u{00E9}',
    "Egrave" => '\u{00C8}',
    "egrave" => '\u{00E8}',
    "Ecircumflex" => '\u{00CA}',
    "ecircumflex" => '\u{00EA}',
    "Edieresis" => '\u{00CB}',
    "edieresis" => '\u{00EB}',
    "Iacute" => '\u{00CD}',
    "iacute" => '\u{00ED}',
    "Igrave" => '\u{00CC}',
    "igrave" => '\u{00EC}',
    "Icircumflex" => '\u{00CE}',
    "icircumflex" => '\u{00EE}',
    "Idieresis" => '\u{00CF}',
    "idieresis" => '\u{00EF}',
    "Ntilde" => '\u{00D1}',
    "ntilde" => '\u{00F1}',
    "Oacute" => '\u{00D3}',
    "oacute" => '\u{00F3}',
    "Ograve" => '\u{00D2}',
    "ograve" => '\u{00F2}',
    "Ocircumflex" => '\u{00D4}',
    "ocircumflex" => '\u{00F4}',
    "Odieresis" => '\u{00D6}',
    "odieresis" => '\u{00F6}',
    "Otilde" => '\u{00D5}',
    "otilde" => '\u{00F5}',
    "Scaron" => '\u{0160}',
    "scaron" => '\u{0161}',
    "Uacute" => '\u{00DA}',
    "uacute" => '\u{00FA}',
    "Ugrave" => '\u{00D9}',
    "ugrave" => '\u{00F9}',
    "Ucircumflex" => '\u{00DB}',
    "ucircumflex" => '\u{00FB}',
    "Udieresis" => '\u{00DC}',
    "udieresis" => '\u{00FC}',
    "Yacute" => '\u{00DD}',
    "yacute" => '\u{00FD}',
    "Ydieresis" => '\u{0178}',
    "ydieresis" => '\u{00FF}',
    "Zcaron" => '\u{017D}',
    "zcaron" => '\u{017E}',
    "Eth" => '\u{00D0}',
    "eth" => '\u{00F0}',
    "Thorn" => '\u{00DE}',
    "thorn" => '\u{00FE}',
    "Gamma" => '\u{0393}',
    "Delta" => '\u{0394}',
    "Theta" => '\u{0398}',
    "Lambda" => '\u{039B}',
    "Xi" => '\u{039E}',
    "Pi" => '\u{03A0}',
    "Sigma" => '\u{03A3}',
    "Phi" => '\u{03A6}',
    "Psi" => '\u{03A8}',
    "Omega" => '\u{03A9}',
    "alpha" => '\u{03B1}',
    "beta" => '\u{03B2}',
    "gamma" => '\u{03B3}',
    "delta" => '\u{03B4}',
    "epsilon" => '\u{03B5}',
    "zeta" => '\u{03B6}',
    "eta" => '\u{03B7}',
    "theta" => '\u{03B8}',
    "iota" => '\u{03B9}',
    "kappa" => '\u{03BA}',
    "lambda" => '\u{03BB}',
    "mu" => '\u{03BC}',
    "nu" => '\u{03BD}',
    "xi" => '\u{03BE}',
    "omicron" => '\u{03BF}',
    "pi" => '\u{03C0}',
    "rho" => '\u{03C1}',
    "sigma" => '\u{03C3}',
    "tau" => '\u{03C4}',
    "upsilon" => '\u{03C5}',
    "phi" => '\u{03C6}',
    "chi" => '\u{03C7}',
    "psi" => '\u{03C8}',
    "omega" => '\u{03C9}',
};

/// StandardEncoding (Annex D.2, STD column).
fn standard_lookup(code: u8) -> Option<char> {
    let c = match code {
        0x27 => '\u{2019}', // quoteright
        0x60 => '\u{2018}', // quoteleft
        0x20..=0x7E => code as char,
        0xA1 => '\u{00A1}',
        0xA2 => '\u{00A2}',
        0xA3 => '\u{00A3}',
        0xA4 => '\u{2044}', // fraction
        0xA5 => '\u{00A5}',
        0xA6 => '\u{0192}', // florin
        0xA7 => '\u{00A7}',
        0xA8 => '\u{00A4}', // currency
        0xA9 => '\u{0027}', // quotesingle
        0xAA => '\u{201C}',
        0xAB => '\u{00AB}',
        0xAC => '\u{2039}',
        0xAD => '\u{203A}',
        0xAE => '\u{FB01}', // fi
        0xAF => '\u{FB02}', // fl
        0xB1 => '\u{2013}',
        0xB2 => '\u{2020}',
        0xB3 => '\u{2021}',
        0xB4 => '\u{00B7}',
        0xB6 => '\u{00B6}',
        0xB7 => '\u{2022}',
        0xB8 => '\u{201A}',
        0xB9 => '\u{201E}',
        0xBA => '\u{201D}',
        0xBB => '\u{00BB}',
        0xBC => '\u{2026}',
        0xBD => '\u{2030}',
        0xBF => '\u{00BF}',
        0xC1 => '\u{0060}', // grave
        0xC2 => '\u{00B4}',
        0xC3 => '\u{02C6}',
        0xC4 => '\u{02DC}',
        0xC5 => '\u{00AF}',
        0xC6 => '\u{02D8}',
        0xC7 => '\u{02D9}',
        0xC8 => '\u{00A8}',
        0xCA => '\u{02DA}',
        0xCB => '\u{00B8}',
        0xCD => '\u{02DD}',
        0xCE => '\u{02DB}',
        0xCF => '\u{02C7}',
        0xD0 => '\u{2014}',
        0xE1 => '\u{00C6}',
        0xE3 => '\u{00AA}',
        0xE8 => '\u{0141}',
        0xE9 => '\u{00D8}',
        0xEA => '\u{0152}',
        0xEB => '\u{00BA}',
        0xF1 => '\u{00E6}',
        0xF5 => '\u{0131}',
        0xF8 => '\u{0142}',
        0xF9 => '\u{00F8}',
        0xFA => '\u{0153}',
        0xFB => '\u{00DF}',
        _ => return None,
    };
    Some(c)
}

/// WinAnsiEncoding (Windows code page 1252).
fn win_ansi_lookup(code: u8) -> Option<char> {
    let c = match code {
        0x20..=0x7E => code as char,
        0x80 => '\u{20AC}', // Euro sign
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        0xA0..=0xFF => char::from_u32(code as u32)?,
        _ => return None,
    };
    Some(c)
}

/// MacRomanEncoding.
fn mac_roman_lookup(code: u8) -> Option<char> {
    const HIGH: [u16; 128] = [
        // 0x80
        0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1, 0x00E0, 0x00E2, 0x00E4,
        0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8, // 0x90
        0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3, 0x00F2, 0x00F4, 0x00F6,
        0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC, // 0xA0
        0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF, 0x00AE, 0x00A9, 0x2122,
        0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8, // 0xB0
        0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211, 0x220F, 0x03C0, 0x222B,
        0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8, // 0xC0
        0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB, 0x00BB, 0x2026, 0x00A0,
        0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153, // 0xD0
        0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA, 0x00FF, 0x0178, 0x2044,
        0x00A4, 0x2039, 0x203A, 0xFB01, 0xFB02, // 0xE0
        0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1, 0x00CB, 0x00C8, 0x00CD,
        0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4, // 0xF0
        0x0000, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC, 0x00AF, 0x02D8, 0x02D9,
        0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
    ];

    match code {
        0x20..=0x7E => Some(code as char),
        0x80..=0xFF => match HIGH[(code - 0x80) as usize] {
            0 => None,
            u => char::from_u32(u as u32),
        },
        _ => None,
    }
}

/// Look up a character in PDFDocEncoding.
///
/// PDFDocEncoding is used for text strings outside content streams (document
/// info, font family names). It is a superset of ISO Latin-1 with a special
/// 0x80-0x9F range.
pub fn pdfdoc_encoding_lookup(code: u8) -> Option<char> {
    let c = match code {
        0x00..=0x7F => code as char,
        0x80 => '\u{2022}', // bullet
        0x81 => '\u{2020}', // dagger
        0x82 => '\u{2021}', // daggerdbl
        0x83 => '\u{2026}', // ellipsis
        0x84 => '\u{2014}', // emdash
        0x85 => '\u{2013}', // endash
        0x86 => '\u{0192}', // florin
        0x87 => '\u{2044}', // fraction
        0x88 => '\u{2039}', // guilsinglleft
        0x89 => '\u{203A}', // guilsinglright
        0x8A => '\u{2212}', // minus
        0x8B => '\u{2030}', // perthousand
        0x8C => '\u{201E}', // quotedblbase
        0x8D => '\u{201C}', // quotedblleft
        0x8E => '\u{201D}', // quotedblright
        0x8F => '\u{2018}', // quoteleft
        0x90 => '\u{2019}', // quoteright
        0x91 => '\u{201A}', // quotesinglbase
        0x92 => '\u{2122}', // trademark
        0x93 => '\u{FB01}', // fi
        0x94 => '\u{FB02}', // fl
        0x95 => '\u{0141}', // Lslash
        0x96 => '\u{0152}', // OE
        0x97 => '\u{0160}', // Scaron
        0x98 => '\u{0178}', // Ydieresis
        0x99 => '\u{017D}', // Zcaron
        0x9A => '\u{0131}', // dotlessi
        0x9B => '\u{0142}', // lslash
        0x9C => '\u{0153}', // oe
        0x9D => '\u{0161}', // scaron
        0x9E => '\u{017E}', // zcaron
        0x9F => return None,
        0xA0 => '\u{20AC}', // Euro
        0xAD => return None,
        0xA1..=0xFF => code as char,
    };
    Some(c)
}
