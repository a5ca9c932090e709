//! Byte-slice utilities for bounds-oriented parsing.
//!
//! Everything here reads out of a `&[u8]` at an explicit offset. Offsets are `usize` and always
//! relative to the start of the slice you pass in, which for this crate is the whole blob.
//!
//! All failures map to [`DumpError`]: short integer reads become `Truncated`, strings that run
//! off the end become `UnterminatedString`.
//!
//! Integers are assembled with `byteorder`, so a little-endian read places byte `i` at bit
//! `i * 8` and a big-endian read places it at bit `(N - 1 - i) * 8`.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use encoding::{DecoderTrap, EncodingRef};

use crate::err::{DumpError, Result};

/// Byte order of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// A fixed-width integer that can be assembled from exactly `SIZE` bytes.
pub trait FixedInt: Copy + Sized {
    const SIZE: usize;

    /// `bytes` is guaranteed to be exactly `SIZE` long.
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self;
}

impl FixedInt for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl FixedInt for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_fixed_int {
    ($($t:ty => $read:ident),* $(,)?) => {
        $(
            impl FixedInt for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
                    B::$read(bytes)
                }
            }
        )*
    };
}

impl_fixed_int! {
    u16 => read_u16,
    i16 => read_i16,
    u32 => read_u32,
    i32 => read_i32,
}

pub(crate) fn slice_r<'a>(
    buf: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8]> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| DumpError::truncated(what, offset, len, buf.len()))?;
    buf.get(offset..end)
        .ok_or_else(|| DumpError::truncated(what, offset, len, buf.len()))
}

/// Read an integer of type `T` at `offset`.
///
/// Never zero-pads: if fewer than `T::SIZE` bytes remain this fails with `DumpError::Truncated`.
pub fn read_int<T: FixedInt>(
    buf: &[u8],
    offset: usize,
    endian: Endianness,
    what: &'static str,
) -> Result<T> {
    let bytes = slice_r(buf, offset, T::SIZE, what)?;
    Ok(match endian {
        Endianness::Little => T::from_bytes::<LittleEndian>(bytes),
        Endianness::Big => T::from_bytes::<BigEndian>(bytes),
    })
}

/// Returns the bytes of the NUL-terminated string starting at `offset`, without the terminator.
///
/// Fails with `DumpError::UnterminatedString` if the end of `buf` is reached before a zero byte,
/// which includes `offset` pointing at or past the end.
pub fn c_string_bytes(buf: &[u8], offset: usize) -> Result<&[u8]> {
    let unterminated = || DumpError::UnterminatedString {
        offset: offset as u64,
        len: buf.len(),
    };

    let tail = buf.get(offset..).ok_or_else(unterminated)?;
    let end = tail.iter().position(|&b| b == 0).ok_or_else(unterminated)?;
    Ok(&tail[..end])
}

/// Fetches a NUL-terminated string at `offset` and decodes it with `codec`.
pub fn read_c_string(buf: &[u8], offset: usize, codec: EncodingRef) -> Result<String> {
    let raw = c_string_bytes(buf, offset)?;
    codec
        .decode(raw, DecoderTrap::Strict)
        .map_err(|m| DumpError::AnsiDecode {
            encoding_used: codec.name(),
            inner_message: m.to_string(),
        })
}
