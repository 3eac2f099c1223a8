use alloc::string::ToString;

use bytes::BytesMut;

use crate::{
    align::{write_word, WORD_SIZE},
    encoder::{concat_prepared, encode_params, ParamEncoder, PreparedParam},
    error::EncodingError,
    types::AbiType,
    value::AbiValue,
};

impl ParamEncoder<'_> {
    /// Encodes `T[k]` (`len` is `Some(k)`) or `T[]`.
    ///
    /// A dynamic array is its element count followed by the head/tail layout of its
    /// elements. A fixed array of dynamic elements is just the head/tail layout. A fixed
    /// array of static elements is the plain concatenation of its elements.
    pub(crate) fn encode_array(
        &self,
        ty: &AbiType,
        inner: &AbiType,
        len: Option<usize>,
        value: &AbiValue,
        depth: usize,
    ) -> Result<PreparedParam, EncodingError> {
        let AbiValue::Array(items) = value else {
            return Err(EncodingError::InvalidArray {
                value: value.to_string(),
            });
        };
        if let Some(expected) = len {
            if items.len() != expected {
                return Err(EncodingError::ArrayLengthMismatch {
                    expected,
                    given: items.len(),
                    ty: ty.to_string(),
                });
            }
        }

        let prepared = self.prepare_all(items.iter().map(|item| (inner, item)), depth + 1)?;
        let dynamic_child = prepared.iter().any(|param| param.dynamic);

        if len.is_none() {
            let mut buf = BytesMut::with_capacity(WORD_SIZE);
            write_word(&mut buf, prepared.len());
            if !prepared.is_empty() {
                buf.unsplit(encode_params(&prepared));
            }
            return Ok(PreparedParam::dynamic(buf));
        }
        if dynamic_child {
            return Ok(PreparedParam::dynamic(encode_params(&prepared)));
        }

        Ok(PreparedParam::fixed(concat_prepared(&prepared)))
    }
}
