//! Error types for font program reconstruction.
//!
//! Absent or mistyped optional entries are never errors here; they are
//! reported as `None` by the dictionary accessors. The variants below cover
//! the conditions that do abort (or are recorded during) construction.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rebuilding a font program.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// FontBBox array too short to hold llx, lly, urx, ury
    #[error("Malformed FontBBox: expected 4 entries, found {0}")]
    MalformedBBox(usize),

    /// ToUnicode CMap could not be decoded
    #[error("CMap decode error: {0}")]
    CMapDecode(String),

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Font error
    #[error("Font error: {0}")]
    Font(String),
}
