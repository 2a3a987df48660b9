use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
/// An error encountered when decoding fails.
///
/// Offsets are absolute positions in the buffer handed to the decoder, even when the
/// failure happened inside a nested payload.
pub enum DecodingError {
    /// A length field promised more bytes than the buffer holds.
    TruncatedBuffer {
        /// Where the read was attempted.
        offset: usize,
        /// How many bytes the read needed.
        needed: usize,
        /// How many bytes were left.
        remaining: usize,
    },
    /// The reserved `255` marker was found where a length prefix was expected.
    ReservedLengthMarker {
        /// Position of the marker byte.
        offset: usize,
    },
    /// An AWG block header carried a negative length.
    InvalidBlockLength {
        /// Position of the length field.
        offset: usize,
        /// The length as read.
        length: i32,
    },
    /// A wide string payload was not valid UTF-16.
    MalformedWstring {
        /// Position of the string's length prefix.
        offset: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A fixed-layout AWG record did not match its schema.
    SchemaMismatch {
        /// Position of the offending field.
        offset: usize,
        /// What was wrong with it.
        detail: String,
    },
    /// Nesting went deeper than [`DecodeOptions::max_depth`].
    ///
    /// [`DecodeOptions::max_depth`]: crate::options::DecodeOptions
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// A non-empty AWB buffer produced no value at all.
    NoValue,
    /// The buffer held neither a FILE nor a FEATURE block.
    NotAFeatureStream,
    /// Neither format could decode the buffer.
    Unrecognized {
        /// Why the feature-stream decode gave up.
        awg: Box<DecodingError>,
        /// Why the object-graph decode gave up.
        awb: Box<DecodingError>,
    },
}

impl DecodingError {
    /// Creates a new `DecodingError::SchemaMismatch`
    ///
    /// # Arguments
    ///
    /// * `offset: usize` - Where in the buffer the mismatch was found.
    /// * `detail: &str` - The message associated with the error.
    pub fn schema(offset: usize, detail: &str) -> Self {
        DecodingError::SchemaMismatch {
            offset,
            detail: detail.to_string(),
        }
    }

    /// Whether this error means the input ended early.
    pub fn is_truncation(&self) -> bool {
        match self {
            DecodingError::TruncatedBuffer { .. } => true,
            _ => false,
        }
    }
}

impl Error for DecodingError {}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodingError::*;
        match self {
            TruncatedBuffer {
                offset,
                needed,
                remaining,
            } => {
                write!(
                    f,
                    "Decoding failed at offset {offset}: needed {needed} bytes but only {remaining} remain",
                    offset = offset,
                    needed = needed,
                    remaining = remaining,
                )
            }
            ReservedLengthMarker { offset } => {
                write!(
                    f,
                    "Decoding failed at offset {}: reserved length marker 255",
                    offset
                )
            }
            InvalidBlockLength { offset, length } => {
                write!(
                    f,
                    "Decoding failed at offset {}: negative block length {}",
                    offset, length
                )
            }
            MalformedWstring { offset, reason } => {
                write!(
                    f,
                    "Decoding failed at offset {}: malformed wide string: {}",
                    offset, reason
                )
            }
            SchemaMismatch { offset, detail } => {
                write!(
                    f,
                    "Decoding failed at offset {}: schema mismatch: {}",
                    offset, detail
                )
            }
            DepthLimitExceeded { limit } => {
                write!(f, "Decoding failed: nesting deeper than {} levels", limit)
            }
            NoValue => write!(f, "Decoding failed: buffer holds no recognizable value"),
            NotAFeatureStream => {
                write!(f, "Decoding failed: buffer holds no FILE or FEATURE block")
            }
            Unrecognized { awg, awb } => {
                write!(
                    f,
                    "Buffer is neither a feature stream ({}) nor an object graph ({})",
                    awg, awb
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
/// An error encountered when an encoder is handed a value of the wrong shape.
pub struct EncodingError(pub String);

impl Error for EncodingError {}

impl EncodingError {
    /// Creates a new `EncodingError`
    ///
    /// # Arguments
    ///
    /// * `s: & str` - The message associated with the error.
    pub fn new(s: &str) -> Self { EncodingError(s.to_string()) }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Encoding failed with error: {error}", error = self.0)
    }
}
