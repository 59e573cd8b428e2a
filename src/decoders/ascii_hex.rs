//! ASCIIHexDecode implementation.
//!
//! Whitespace is ignored, `>` ends the data, and a trailing odd digit is
//! padded with an implicit '0'.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        let mut pending: Option<u8> = None;

        for &c in input {
            if c == b'>' {
                break;
            }
            if c.is_ascii_whitespace() {
                continue;
            }
            let nibble = hex_value(c).ok_or_else(|| {
                Error::Decode(format!("ASCIIHexDecode: invalid hex digit '{}'", c as char))
            })?;
            match pending.take() {
                Some(high) => output.push((high << 4) | nibble),
                None => pending = Some(nibble),
            }
        }

        if let Some(high) = pending {
            output.push(high << 4);
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

/// Value of a single hexadecimal ASCII digit.
pub(crate) fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_hex_with_whitespace_and_eod() {
        let output = AsciiHexDecoder.decode(b"48 65 6C\n6C 6F> trailing").unwrap();
        assert_eq!(output, b"Hello");
    }

    #[test]
    fn test_ascii_hex_odd_length() {
        let output = AsciiHexDecoder.decode(b"486").unwrap();
        assert_eq!(output, b"H`");
    }

    #[test]
    fn test_ascii_hex_invalid_digit() {
        assert!(AsciiHexDecoder.decode(b"4G").is_err());
    }

    #[test]
    fn test_hex_value() {
        assert_eq!(hex_value(b'0'), Some(0));
        assert_eq!(hex_value(b'f'), Some(15));
        assert_eq!(hex_value(b'F'), Some(15));
        assert_eq!(hex_value(b'g'), None);
    }
}
