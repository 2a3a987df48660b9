//! # Blob: the primitive layer
//!
//! Fixed-width little-endian scalars, the [length prefix](length), wide strings and
//! colors, shared by the [AWB](crate::awb) and [AWG](crate::awg) formats.
//!
//! # Example
//!
//! ```
//! use awcodec::encoding::{cursor::Cursor, ser::Serializer};
//!
//! // write a few primitives
//! let out = &mut Vec::<u8>::new();
//! out.put_i32(-7);
//! out.put_f32(1.5);
//! out.put_wstring("héllo");
//!
//! // and read them back in the same order
//! let mut cur = Cursor::new(out);
//! assert_eq!(cur.read_i32().unwrap(), -7);
//! assert_eq!(cur.read_f32().unwrap(), 1.5);
//! assert_eq!(cur.read_wstring().unwrap(), "héllo");
//! assert!(cur.is_empty());
//! ```

use crate::errors::DecodingError;

pub mod cursor;
pub mod de;
pub mod length;
pub mod ser;

pub use cursor::Cursor;
pub use ser::Serializer;

/// Result of a decoding step.
pub type Result<T> = std::result::Result<T, DecodingError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
/// An 8-bit-per-channel color.
///
/// `a` is conventional alpha (255 is opaque); on the wire it is stored as `255 - a`.
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}
