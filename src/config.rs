//! Options controlling font program reconstruction.

/// Options for rebuilding font programs from font dictionaries.
///
/// # Example
///
/// ```
/// use pdf_docfont::config::FontLoaderOptions;
///
/// // Lenient mode (default): tolerate sloppy CMaps
/// let lenient = FontLoaderOptions::default();
/// assert!(!lenient.strict);
///
/// // Custom default width for CID fonts without a declared DW
/// let custom = FontLoaderOptions::lenient().with_default_cid_width(500);
/// assert_eq!(custom.default_cid_width, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontLoaderOptions {
    /// Reject inconsistent CMap data instead of using what is available.
    ///
    /// In strict mode a `bfrange` whose destination array does not hold
    /// exactly one entry per code is a decode error.
    pub strict: bool,

    /// Width used for CIDs without an explicit width when the descriptor
    /// declares no `DW`.
    pub default_cid_width: i32,

    /// Largest span accepted for a single CMap `bfrange` or `W` range entry.
    ///
    /// Hostile documents declare ranges like `<0000> <FFFFFFFF>`; anything
    /// wider than this is rejected (CMap) or skipped (widths).
    pub max_cid_range: u32,

    /// Maximum decoded size of a ToUnicode stream in bytes (0 = unlimited).
    pub max_stream_size: usize,
}

impl Default for FontLoaderOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

impl FontLoaderOptions {
    /// Strict mode: inconsistent CMap data fails the mapping.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    /// Lenient mode: use whatever CMap data is usable.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            default_cid_width: 1000,
            max_cid_range: 10_000,
            max_stream_size: 16 * 1024 * 1024, // 16 MB
        }
    }

    /// Set the fallback CID width.
    pub fn with_default_cid_width(mut self, width: i32) -> Self {
        self.default_cid_width = width;
        self
    }

    /// Set the range span limit.
    pub fn with_max_cid_range(mut self, span: u32) -> Self {
        self.max_cid_range = span;
        self
    }

    /// Set the decoded ToUnicode stream size limit.
    pub fn with_max_stream_size(mut self, bytes: usize) -> Self {
        self.max_stream_size = bytes;
        self
    }
}
