use crate::err::Result;
use crate::utils::bytes::{self, Endianness, FixedInt};

/// A lightweight cursor over an immutable byte slice.
///
/// This is the slice/offset equivalent of `Cursor<&[u8]>`: the whole blob is already in memory,
/// and we want explicit bounds/offset control. Positions are absolute offsets into the blob, so
/// a cursor seeked to a table start reports file offsets directly.
///
/// Reads advance the cursor on success and leave it untouched on failure.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn with_pos(buf: &'a [u8], pos: usize) -> Result<Self> {
        // Allow pos == len (EOF), reject pos > len.
        let _ = bytes::slice_r(buf, pos, 0, "cursor.position")?;
        Ok(Self { buf, pos })
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn read_int<T: FixedInt>(&mut self, endian: Endianness, what: &'static str) -> Result<T> {
        let v = bytes::read_int::<T>(self.buf, self.pos, endian, what)?;
        self.pos += T::SIZE;
        Ok(v)
    }

    /// Little-endian shorthand for [`ByteCursor::read_int`].
    #[inline]
    pub fn le<T: FixedInt>(&mut self, what: &'static str) -> Result<T> {
        self.read_int(Endianness::Little, what)
    }
}
