//! The self-describing length prefix.
//!
//! | First byte | Followed by  | Value          |
//! | ---        | ---          | ---            |
//! | `0..=252`  | nothing      | the byte       |
//! | `253`      | LE `u16`     | the `u16`      |
//! | `254`      | LE `u32`     | the `u32`      |
//! | `255`      | -            | reserved       |

use super::{cursor::Cursor, Result};
use crate::errors::DecodingError;
use smallvec::SmallVec;

/// Largest length that fits in the marker byte itself.
pub const MAX_INLINE: u32 = 252;
/// Marker for a following `u16`.
pub const MARKER_U16: u8 = 253;
/// Marker for a following `u32`.
pub const MARKER_U32: u8 = 254;
/// Reserved marker, never a valid length.
pub const MARKER_RESERVED: u8 = 255;

/// Encodes `n` in the smallest representation that fits.
///
/// Zero is the absent payload and encodes as no bytes at all; framing that must always
/// carry a length writes a literal `0` instead (see
/// [`Serializer::put_len`](super::ser::Serializer::put_len)).
///
/// # Arguments
///
/// * `n: u32` - The byte count to encode.
///
/// # Example
///
/// ```
/// use awcodec::encoding::length::length_prefix;
///
/// assert_eq!(length_prefix(252).as_slice(), &[252]);
/// assert_eq!(length_prefix(253).as_slice(), &[253, 253, 0]);
/// assert!(length_prefix(0).is_empty());
/// ```
pub fn length_prefix(n: u32) -> SmallVec<[u8; 5]> {
    let mut out = SmallVec::new();
    if n == 0 {
        return out;
    }
    if n <= MAX_INLINE {
        out.push(n as u8);
    } else if n <= u16::max_value() as u32 {
        out.push(MARKER_U16);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else {
        out.push(MARKER_U32);
        out.extend_from_slice(&n.to_le_bytes());
    }
    out
}

/// Reads a length prefix, advancing the cursor past it.
///
/// Fails with [`DecodingError::ReservedLengthMarker`] on the reserved marker and with
/// [`DecodingError::TruncatedBuffer`] if the marker promises more bytes than remain.
pub fn read_length(cur: &mut Cursor<'_>) -> Result<u32> {
    let offset = cur.position();
    match cur.read_u8()? {
        MARKER_RESERVED => Err(DecodingError::ReservedLengthMarker { offset }),
        MARKER_U32 => cur.read_u32(),
        MARKER_U16 => Ok(cur.read_u16()? as u32),
        n => Ok(n as u32),
    }
}
