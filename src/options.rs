//! Per-call decoder settings.

/// Default bound on AWB object/array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Settings threaded through a single decode call.
///
/// # Example
///
/// ```
/// use awcodec::options::DecodeOptions;
///
/// let opts = DecodeOptions::default().with_max_depth(8);
///
/// assert_eq!(opts.max_depth, 8);
/// ```
pub struct DecodeOptions {
    /// How many nested objects/arrays a decoder will follow before giving up with
    /// [`DecodingError::DepthLimitExceeded`](crate::errors::DecodingError).
    pub max_depth: usize,
}

impl DecodeOptions {
    /// Returns a copy with a different nesting limit.
    ///
    /// # Arguments
    ///
    /// * `max_depth: usize` - The new limit.
    pub fn with_max_depth(self, max_depth: usize) -> Self { DecodeOptions { max_depth } }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
