use alloc::vec::Vec;

use alloy_primitives::Bytes;
use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::{
    align::{write_word, WORD_SIZE},
    config::EncodeOptions,
    error::{CodecError, EncodingError},
    primitive::{encode_address, encode_bool, encode_bytes, encode_number, encode_string},
    types::{AbiParameter, AbiType},
    value::AbiValue,
};

/// A single value encoded against its type, before head/tail layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedParam {
    /// Whether the value goes to the tail, referenced by an offset word in the head.
    pub dynamic: bool,
    /// Encoding of the value; always a whole number of words.
    pub encoded: bytes::Bytes,
}

impl PreparedParam {
    pub fn fixed(encoded: impl Into<bytes::Bytes>) -> Self {
        Self {
            dynamic: false,
            encoded: encoded.into(),
        }
    }

    pub fn dynamic(encoded: impl Into<bytes::Bytes>) -> Self {
        Self {
            dynamic: true,
            encoded: encoded.into(),
        }
    }
}

/// Encodes `values` against `params` the way `abi.encode` does.
///
/// Returns `0x` for an empty parameter list.
///
/// ```
/// use abi_codec::{encode_abi_parameters, AbiParameter};
///
/// let params = [AbiParameter::new("uint256"), AbiParameter::new("bool")];
/// let encoded = encode_abi_parameters(&params, &[420u64.into(), true.into()])?;
/// assert_eq!(encoded.len(), 64);
/// assert_eq!(encoded[31], 0xa4);
/// assert_eq!(encoded[63], 1);
/// # Ok::<(), abi_codec::CodecError>(())
/// ```
pub fn encode_abi_parameters(
    params: &[AbiParameter],
    values: &[AbiValue],
) -> Result<Bytes, CodecError> {
    encode_abi_parameters_with(params, values, &EncodeOptions::default())
}

/// [`encode_abi_parameters`] with explicit [`EncodeOptions`].
pub fn encode_abi_parameters_with(
    params: &[AbiParameter],
    values: &[AbiValue],
    options: &EncodeOptions,
) -> Result<Bytes, CodecError> {
    trace!(params = params.len(), "encoding abi parameters");
    let prepared = prepare_params(params, values, options)?;
    let encoded = encode_params(&prepared);
    trace!(size = encoded.len(), "encoded abi parameters");
    Ok(Bytes::from(encoded.freeze()))
}

/// Resolves each parameter type and prepares the matching value.
pub fn prepare_params(
    params: &[AbiParameter],
    values: &[AbiValue],
    options: &EncodeOptions,
) -> Result<Vec<PreparedParam>, EncodingError> {
    if params.len() != values.len() {
        return Err(EncodingError::LengthMismatch {
            expected: params.len(),
            given: values.len(),
        });
    }
    let encoder = ParamEncoder::new(options);
    params
        .iter()
        .zip(values)
        .map(|(param, value)| {
            let ty = param.resolve_with(options.max_depth)?;
            encoder.prepare_param(&ty, value, 0)
        })
        .collect()
}

/// Prepares a single value against an already resolved type.
pub fn prepare_param(
    ty: &AbiType,
    value: &AbiValue,
    options: &EncodeOptions,
) -> Result<PreparedParam, EncodingError> {
    ParamEncoder::new(options).prepare_param(ty, value, 0)
}

/// Lays prepared values out head first, tail second.
///
/// Static values are written into the head in place. Each dynamic value is written into
/// the tail and referenced from the head by a word holding its offset from the start of
/// the head.
pub fn encode_params(prepared: &[PreparedParam]) -> BytesMut {
    let static_size: usize = prepared
        .iter()
        .map(|param| {
            if param.dynamic {
                WORD_SIZE
            } else {
                param.encoded.len()
            }
        })
        .sum();
    let dynamic_size: usize = prepared
        .iter()
        .filter(|param| param.dynamic)
        .map(|param| param.encoded.len())
        .sum();

    let mut head = BytesMut::with_capacity(static_size + dynamic_size);
    let mut tail = BytesMut::with_capacity(dynamic_size);
    for param in prepared {
        if param.dynamic {
            write_word(&mut head, static_size + tail.len());
            tail.put_slice(&param.encoded);
        } else {
            head.put_slice(&param.encoded);
        }
    }
    head.unsplit(tail);
    head
}

/// Concatenates the encodings of static values without any layout.
pub(crate) fn concat_prepared(prepared: &[PreparedParam]) -> BytesMut {
    let total = prepared.iter().map(|param| param.encoded.len()).sum();
    let mut buf = BytesMut::with_capacity(total);
    for param in prepared {
        buf.put_slice(&param.encoded);
    }
    buf
}

/// Recursive preparation of values, carrying the options and enforcing the depth bound.
pub(crate) struct ParamEncoder<'a> {
    pub(crate) options: &'a EncodeOptions,
}

impl<'a> ParamEncoder<'a> {
    pub(crate) fn new(options: &'a EncodeOptions) -> Self {
        Self { options }
    }

    pub(crate) fn prepare_param(
        &self,
        ty: &AbiType,
        value: &AbiValue,
        depth: usize,
    ) -> Result<PreparedParam, EncodingError> {
        if depth > self.options.max_depth {
            return Err(EncodingError::DepthLimitExceeded {
                max_depth: self.options.max_depth,
            });
        }
        match ty {
            AbiType::Array(inner, len) => self.encode_array(ty, inner, *len, value, depth),
            AbiType::Tuple(components) => self.encode_tuple(components, value, depth),
            AbiType::Address => encode_address(value, self.options.strict_addresses),
            AbiType::Bool => encode_bool(value),
            AbiType::Uint(bits) => encode_number(value, *bits, false),
            AbiType::Int(bits) => encode_number(value, *bits, true),
            AbiType::FixedBytes(size) => encode_bytes(value, Some(*size)),
            AbiType::Bytes => encode_bytes(value, None),
            AbiType::String => encode_string(value),
        }
    }

    pub(crate) fn prepare_all<'v>(
        &self,
        items: impl Iterator<Item = (&'v AbiType, &'v AbiValue)>,
        depth: usize,
    ) -> Result<Vec<PreparedParam>, EncodingError> {
        items
            .map(|(ty, value)| self.prepare_param(ty, value, depth))
            .collect()
    }
}
