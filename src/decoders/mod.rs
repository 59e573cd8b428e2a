//! Stream decoders for the filters found on font-related streams.
//!
//! ToUnicode CMaps and embedded font files are almost always FlateDecode
//! compressed; ASCIIHexDecode shows up in hand-written and test documents.
//! Decoders can be chained in a filter pipeline.

use crate::error::{Error, Result};

pub(crate) mod ascii_hex;
mod flate;

pub use ascii_hex::AsciiHexDecoder;
pub use flate::FlateDecoder;

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decode at most a little more than `max_size` bytes (0 = unlimited).
    ///
    /// Decoders that can stop early override this so oversized output is
    /// never fully materialized; the caller still checks the final length.
    fn decode_limited(&self, input: &[u8], _max_size: usize) -> Result<Vec<u8>> {
        self.decode(input)
    }

    /// Get the name of this decoder (e.g., "FlateDecode").
    fn name(&self) -> &str;
}

/// Look up the decoder for a filter name.
fn decoder_for(filter_name: &str) -> Result<Box<dyn StreamDecoder>> {
    match filter_name {
        "FlateDecode" | "Fl" => Ok(Box::new(FlateDecoder)),
        "ASCIIHexDecode" | "AHx" => Ok(Box::new(AsciiHexDecoder)),
        _ => Err(Error::UnsupportedFilter(filter_name.to_string())),
    }
}

/// Decode stream data using a filter pipeline.
///
/// Filters are applied in order. `max_size` caps the output of every stage;
/// pass 0 to disable the check.
///
/// # Examples
///
/// ```
/// use pdf_docfont::decoders::decode_stream;
///
/// let decoded = decode_stream(b"48656C6C6F>", &["ASCIIHexDecode".to_string()], 0).unwrap();
/// assert_eq!(decoded, b"Hello");
/// ```
pub fn decode_stream(data: &[u8], filters: &[String], max_size: usize) -> Result<Vec<u8>> {
    let mut current = data.to_vec();

    for filter_name in filters {
        let decoder = decoder_for(filter_name)?;
        current = decoder.decode_limited(&current, max_size)?;
        log::trace!("{}: {} bytes decoded", decoder.name(), current.len());

        if max_size > 0 && current.len() > max_size {
            return Err(Error::Decode(format!(
                "decoded size {} bytes exceeds limit {} bytes",
                current.len(),
                max_size
            )));
        }
    }

    Ok(current)
}
