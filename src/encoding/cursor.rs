use super::Result;
use crate::errors::DecodingError;
use bytes::Buf;

#[derive(Clone, Debug)]
/// Read cursor over a borrowed byte slice. All reads are little-endian.
///
/// Payloads handed out by [`Cursor::read_slice`] and [`Cursor::sub_cursor`] are views into
/// the same buffer; nothing is copied until a value is materialized.
pub struct Cursor<'a> {
    buf: &'a [u8],
    origin: usize,
    len: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self { Cursor::at(data, 0) }

    /// Creates a cursor over `data`, reporting positions as if `data` started at `origin`
    /// in some enclosing buffer.
    pub(crate) fn at(data: &'a [u8], origin: usize) -> Self {
        Cursor {
            buf: data,
            origin,
            len: data.len(),
        }
    }

    /// Absolute position of the next unread byte.
    pub fn position(&self) -> usize { self.origin + self.len - self.buf.len() }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize { self.buf.remaining() }

    /// Whether the cursor is exhausted.
    pub fn is_empty(&self) -> bool { !self.buf.has_remaining() }

    /// Fails unless at least `n` bytes remain.
    #[inline]
    pub fn ensure(&self, n: usize) -> Result<()> {
        if self.buf.remaining() >= n {
            Ok(())
        } else {
            Err(DecodingError::TruncatedBuffer {
                offset: self.position(),
                needed: n,
                remaining: self.buf.remaining(),
            })
        }
    }

    /// Reads `n` bytes without copying.
    #[inline]
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Reads `n` bytes as a cursor of their own, keeping absolute positions.
    pub fn sub_cursor(&mut self, n: usize) -> Result<Cursor<'a>> {
        let origin = self.position();
        Ok(Cursor::at(self.read_slice(n)?, origin))
    }

    /// Skips `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.buf.advance(n);
        Ok(())
    }

    /// Looks at the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> { self.buf.first().copied() }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.buf.get_u16_le())
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.buf.get_i16_le())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.buf.get_f32_le())
    }
}
