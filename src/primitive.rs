use alloc::string::ToString;

use alloy_primitives::Bytes;
use bytes::{BufMut, BytesMut};

use crate::{
    address::parse_address,
    align::{pad, pad_word, write_right_aligned, write_word, PadDirection, WORD_SIZE},
    bytes::{bool_to_bytes, check_integer_range, hex_to_bytes, number_to_bytes, string_to_bytes},
    encoder::PreparedParam,
    error::EncodingError,
    value::AbiValue,
};

/// Resolves the 20 address bytes of an `address` slot value.
pub(crate) fn address_bytes(value: &AbiValue, strict: bool) -> Result<[u8; 20], EncodingError> {
    let address = match value {
        AbiValue::Address(address) => Some(*address),
        AbiValue::String(text) => parse_address(text, strict),
        _ => None,
    };
    address
        .map(|address| address.0 .0)
        .ok_or_else(|| EncodingError::InvalidAddress {
            value: value.to_string(),
        })
}

/// Resolves the raw bytes of a `bytes`/`bytesN` slot value.
pub(crate) fn value_bytes(value: &AbiValue) -> Result<Bytes, EncodingError> {
    match value {
        AbiValue::Bytes(bytes) => Ok(bytes.clone()),
        AbiValue::String(text) => hex_to_bytes(text),
        _ => Err(EncodingError::InvalidValue {
            expected: "bytes",
            value: value.to_string(),
            kind: value.kind(),
        }),
    }
}

pub(crate) fn bool_value(value: &AbiValue) -> Result<bool, EncodingError> {
    match value {
        AbiValue::Bool(flag) => Ok(*flag),
        _ => Err(EncodingError::InvalidBool {
            value: value.to_string(),
            kind: value.kind(),
        }),
    }
}

pub(crate) fn string_value(value: &AbiValue) -> Result<&str, EncodingError> {
    match value {
        AbiValue::String(text) => Ok(text),
        _ => Err(EncodingError::InvalidValue {
            expected: "string",
            value: value.to_string(),
            kind: value.kind(),
        }),
    }
}

pub(crate) fn fixed_bytes_value(value: &AbiValue, size: usize) -> Result<Bytes, EncodingError> {
    let bytes = value_bytes(value)?;
    if bytes.len() != size {
        return Err(EncodingError::BytesSizeMismatch {
            expected: size,
            given: bytes.len(),
            value: bytes.to_string(),
        });
    }
    Ok(bytes)
}

pub fn encode_address(value: &AbiValue, strict: bool) -> Result<PreparedParam, EncodingError> {
    let address = address_bytes(value, strict)?;
    Ok(PreparedParam::fixed(pad_word(&address)?))
}

pub fn encode_bool(value: &AbiValue) -> Result<PreparedParam, EncodingError> {
    let flag = bool_value(value)?;
    Ok(PreparedParam::fixed(pad_word(&bool_to_bytes(flag))?))
}

/// Encodes an integer of `bits` width into one word, rejecting values outside its range.
pub fn encode_number(
    value: &AbiValue,
    bits: usize,
    signed: bool,
) -> Result<PreparedParam, EncodingError> {
    let integer = value.as_integer().ok_or_else(|| EncodingError::InvalidValue {
        expected: "integer",
        value: value.to_string(),
        kind: value.kind(),
    })?;
    check_integer_range(&integer, bits, signed)?;
    Ok(PreparedParam::fixed(number_to_bytes(
        &integer, WORD_SIZE, signed,
    )?))
}

/// Encodes `bytes` (when `size` is `None`) or `bytesN`.
///
/// Dynamic bytes are a length word followed by the data right-padded to a word boundary;
/// fixed bytes are right-padded into a single word.
pub fn encode_bytes(value: &AbiValue, size: Option<usize>) -> Result<PreparedParam, EncodingError> {
    match size {
        Some(size) => {
            let bytes = fixed_bytes_value(value, size)?;
            Ok(PreparedParam::fixed(pad(&bytes, PadDirection::Right, WORD_SIZE)?))
        }
        None => {
            let bytes = value_bytes(value)?;
            Ok(PreparedParam::dynamic(length_prefixed(&bytes)))
        }
    }
}

/// Encodes a UTF-8 string: a word with its byte length, then the bytes in right-padded words.
pub fn encode_string(value: &AbiValue) -> Result<PreparedParam, EncodingError> {
    let text = string_value(value)?;
    Ok(PreparedParam::dynamic(length_prefixed(string_to_bytes(text))))
}

fn length_prefixed(data: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(WORD_SIZE + data.len() + WORD_SIZE);
    write_word(&mut buf, data.len());
    write_right_aligned(&mut buf, data);
    buf
}
