//! FlateDecode (zlib/deflate) implementation.
//!
//! Uses the flate2 crate for zlib decompression.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// FlateDecode filter implementation.
pub struct FlateDecoder;

/// Read everything, or stop one byte past `max_size` when it is non-zero.
fn read_bounded<R: Read>(reader: R, max_size: usize, output: &mut Vec<u8>) -> std::io::Result<usize> {
    let cap = if max_size == 0 {
        u64::MAX
    } else {
        max_size as u64 + 1
    };
    reader.take(cap).read_to_end(output)
}

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decode_limited(input, 0)
    }

    fn decode_limited(&self, input: &[u8], max_size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        match read_bounded(ZlibDecoder::new(input), max_size, &mut output) {
            Ok(_) => Ok(output),
            Err(e) => {
                // Truncated streams still carry a usable prefix
                if !output.is_empty() {
                    log::warn!(
                        "FlateDecode partial recovery: {} bytes before corruption: {}",
                        output.len(),
                        e
                    );
                    return Ok(output);
                }

                // Some writers omit the zlib wrapper entirely
                log::debug!("Zlib decode failed ({}), trying raw deflate", e);
                output.clear();
                match read_bounded(DeflateDecoder::new(input), max_size, &mut output) {
                    Ok(_) if !output.is_empty() => Ok(output),
                    Err(_) if !output.is_empty() => {
                        log::warn!("Raw deflate partial recovery: {} bytes", output.len());
                        Ok(output)
                    },
                    _ => Err(Error::Decode(format!("FlateDecode failed: {}", e))),
                }
            },
        }
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}
