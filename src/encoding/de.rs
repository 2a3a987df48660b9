use super::{cursor::Cursor, length::read_length, Color, Result};
use crate::errors::DecodingError;

/// Reinterprets raw bytes as UTF-16LE code units.
///
/// `offset` is only used for error reporting.
pub fn decode_utf16(bytes: &[u8], offset: usize) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(DecodingError::MalformedWstring {
            offset,
            reason: format!("odd byte count {}", bytes.len()),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| {
        DecodingError::MalformedWstring {
            offset,
            reason: e.to_string(),
        }
    })
}

impl<'a> Cursor<'a> {
    /// Reads a length-prefixed UTF-16LE string.
    ///
    /// The prefix counts bytes, so it must be even.
    pub fn read_wstring(&mut self) -> Result<String> {
        let offset = self.position();
        let len = read_length(self)? as usize;
        if len % 2 != 0 {
            return Err(DecodingError::MalformedWstring {
                offset,
                reason: format!("odd byte count {}", len),
            });
        }
        decode_utf16(self.read_slice(len)?, offset)
    }

    /// Reads an optional trailing string.
    ///
    /// An exhausted cursor and an empty string are both `None`.
    pub fn read_opt_wstring(&mut self) -> Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        let s = self.read_wstring()?;
        Ok(if s.is_empty() { None } else { Some(s) })
    }

    /// Reads a one-byte boolean. Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> { Ok(self.read_u8()? != 0) }

    /// Reads an `r, g, b, a` color, un-inverting the stored alpha.
    pub fn read_color(&mut self) -> Result<Color> {
        let bytes = self.read_slice(4)?;
        Ok(Color {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: 255 - bytes[3],
        })
    }
}
