use alloc::{string::ToString, vec::Vec};

use alloy_primitives::{hex, Bytes, I256, U256};
use bytes::{BufMut, BytesMut};

use crate::{error::EncodingError, value::Integer};

/// Byte length of a hex string, with or without the `0x` prefix.
/// An odd number of digits counts the leading nibble as a whole byte.
pub fn hex_size(value: &str) -> usize {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    (digits.len() + 1) / 2
}

/// Extracts the byte range `start..end` (or `start..` when `end` is `None`).
pub fn slice(data: &[u8], start: usize, end: Option<usize>) -> Result<&[u8], EncodingError> {
    let end = end.unwrap_or(data.len());
    if start > end || end > data.len() {
        return Err(EncodingError::SliceOutOfBounds {
            start,
            end,
            size: data.len(),
        });
    }
    Ok(&data[start..end])
}

/// Concatenates byte strings into one.
pub fn concat<T: AsRef<[u8]>>(parts: &[T]) -> Bytes {
    let total = parts.iter().map(|p| p.as_ref().len()).sum();
    let mut buf = BytesMut::with_capacity(total);
    for part in parts {
        buf.put_slice(part.as_ref());
    }
    Bytes::from(buf.freeze())
}

/// Decodes a `0x`-prefixed hex string.
pub fn hex_to_bytes(value: &str) -> Result<Bytes, EncodingError> {
    let invalid = || EncodingError::InvalidHex {
        value: value.to_string(),
    };
    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
    hex::decode(digits).map(Bytes::from).map_err(|_| invalid())
}

#[inline]
pub fn bool_to_bytes(value: bool) -> [u8; 1] {
    [value as u8]
}

#[inline]
pub fn string_to_bytes(value: &str) -> &[u8] {
    value.as_bytes()
}

/// Inclusive bounds of an integer of `bits` width.
pub fn integer_bounds(bits: usize, signed: bool) -> (U256, I256) {
    let max = U256::MAX >> (256 - bits + signed as usize);
    let min = if signed {
        -I256::from_raw(max) - I256::ONE
    } else {
        I256::ZERO
    };
    (max, min)
}

/// Checks that `value` fits into an integer of `bits` width.
pub fn check_integer_range(value: &Integer, bits: usize, signed: bool) -> Result<(), EncodingError> {
    let (max, min) = integer_bounds(bits, signed);
    let fits = if value.is_negative() {
        // |min| == max + 1 for signed types, and 0 for unsigned ones
        signed && value.magnitude() - U256::from(1u8) <= max
    } else {
        value.magnitude() <= max
    };
    if fits {
        Ok(())
    } else {
        Err(EncodingError::IntegerOutOfRange {
            max,
            min,
            signed,
            size: bits / 8,
            value: value.to_string(),
        })
    }
}

/// Encodes `value` as a big-endian integer of `size` bytes, two's complement when `signed`.
pub fn number_to_bytes(value: &Integer, size: usize, signed: bool) -> Result<Vec<u8>, EncodingError> {
    if size == 0 || size > 32 {
        return Err(EncodingError::InvalidSize { size, target: 32 });
    }
    check_integer_range(value, size * 8, signed)?;
    let raw = if value.is_negative() {
        U256::ZERO.wrapping_sub(value.magnitude())
    } else {
        value.magnitude()
    };
    let word = raw.to_be_bytes::<32>();
    Ok(word[32 - size..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_hex_size() {
        assert_eq!(hex_size("0x"), 0);
        assert_eq!(hex_size("0x1"), 1);
        assert_eq!(hex_size("0x1234"), 2);
        assert_eq!(hex_size("deadbeef"), 4);
    }

    #[test]
    fn test_slice() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(slice(&data, 1, Some(3)).unwrap(), &[2, 3]);
        assert_eq!(slice(&data, 2, None).unwrap(), &[3, 4]);
        assert!(matches!(
            slice(&data, 3, Some(5)),
            Err(EncodingError::SliceOutOfBounds { start: 3, end: 5, size: 4 })
        ));
    }

    #[test]
    fn test_concat() {
        let joined = concat(&[&[0xde, 0xad][..], &[][..], &[0xbe, 0xef][..]]);
        assert_eq!(&joined[..], hex!("deadbeef"));
        assert_eq!(joined.to_string(), "0xdeadbeef");
        assert_eq!(concat::<&[u8]>(&[]).to_string(), "0x");
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(&hex_to_bytes("0xc0ffee").unwrap()[..], hex!("c0ffee"));
        assert_eq!(hex_to_bytes("0x").unwrap().len(), 0);
        assert!(matches!(hex_to_bytes("c0ffee"), Err(EncodingError::InvalidHex { .. })));
        assert!(matches!(hex_to_bytes("0xzz"), Err(EncodingError::InvalidHex { .. })));
    }

    #[test]
    fn test_integer_bounds() {
        let (max, min) = integer_bounds(8, false);
        assert_eq!(max, U256::from(255u16));
        assert_eq!(min, I256::ZERO);

        let (max, min) = integer_bounds(8, true);
        assert_eq!(max, U256::from(127u8));
        assert_eq!(min, I256::try_from(-128i64).unwrap());

        let (max, min) = integer_bounds(256, true);
        assert_eq!(max, U256::MAX >> 1);
        assert_eq!(min, I256::MIN);

        assert_eq!(integer_bounds(256, false).0, U256::MAX);
    }

    #[test]
    fn test_number_to_bytes_unsigned() {
        let value = Integer::from(U256::from(420u16));
        assert_eq!(number_to_bytes(&value, 2, false).unwrap(), hex!("01a4"));
        assert!(matches!(
            number_to_bytes(&value, 1, false),
            Err(EncodingError::IntegerOutOfRange { size: 1, .. })
        ));
    }

    #[test]
    fn test_number_to_bytes_twos_complement() {
        let minus_one = Integer::from(I256::MINUS_ONE);
        assert_eq!(number_to_bytes(&minus_one, 2, true).unwrap(), hex!("ffff"));
        assert_eq!(number_to_bytes(&minus_one, 32, true).unwrap(), [0xff; 32]);

        let min = Integer::from(I256::try_from(-128i64).unwrap());
        assert_eq!(number_to_bytes(&min, 1, true).unwrap(), hex!("80"));

        let below = Integer::from(I256::try_from(-129i64).unwrap());
        assert!(number_to_bytes(&below, 1, true).is_err());
        assert!(number_to_bytes(&minus_one, 1, false).is_err());
    }

    #[test]
    fn test_bool_and_string_bytes() {
        assert_eq!(bool_to_bytes(true), [1]);
        assert_eq!(bool_to_bytes(false), [0]);
        assert_eq!(string_to_bytes("gm"), b"gm");
    }
}
