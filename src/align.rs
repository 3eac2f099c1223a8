use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};

use crate::error::EncodingError;

/// Size of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Where the data lands inside a padded region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadDirection {
    /// Data is right-aligned, zeros are prepended (numbers, addresses, booleans).
    #[default]
    Left,
    /// Data is left-aligned, zeros are appended (fixed bytes, byte/string bodies).
    Right,
}

#[inline(always)]
pub const fn align_up<const ALIGN: usize>(offset: usize) -> usize {
    (offset + ALIGN - 1) / ALIGN * ALIGN
}

/// Pads `data` with zero bytes to `size` bytes in the given direction.
///
/// Fails with [`EncodingError::InvalidSize`] if `data` is already longer than `size`.
pub fn pad(data: &[u8], dir: PadDirection, size: usize) -> Result<Vec<u8>, EncodingError> {
    if data.len() > size {
        return Err(EncodingError::InvalidSize {
            size: data.len(),
            target: size,
        });
    }
    let mut out = Vec::with_capacity(size);
    match dir {
        PadDirection::Left => {
            out.resize(size - data.len(), 0);
            out.extend_from_slice(data);
        }
        PadDirection::Right => {
            out.extend_from_slice(data);
            out.resize(size, 0);
        }
    }
    Ok(out)
}

/// Left-pads `data` to one ABI word.
#[inline]
pub fn pad_word(data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    pad(data, PadDirection::Left, WORD_SIZE)
}

/// Appends one big-endian word holding `value` (an offset or a length) to `buf`.
pub fn write_word(buf: &mut BytesMut, value: usize) {
    let mut word = [0u8; WORD_SIZE];
    BigEndian::write_u64(&mut word[WORD_SIZE - 8..], value as u64);
    buf.put_slice(&word);
}

/// Appends `data` to `buf`, followed by zeros up to the next word boundary.
pub fn write_right_aligned(buf: &mut BytesMut, data: &[u8]) {
    buf.put_slice(data);
    let padded = align_up::<WORD_SIZE>(data.len());
    buf.put_bytes(0, padded - data.len());
}
