use alloc::string::ToString;

use alloy_primitives::Bytes;
use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::{
    align::{pad, PadDirection, WORD_SIZE},
    bytes::{bool_to_bytes, number_to_bytes, string_to_bytes},
    config::EncodeOptions,
    error::{CodecError, EncodingError},
    primitive::{address_bytes, bool_value, fixed_bytes_value, string_value, value_bytes},
    types::AbiType,
    value::AbiValue,
};

/// Encodes `values` against `types` the way `abi.encodePacked` does.
///
/// Values are emitted at their natural width with no offsets or length words. Inside
/// arrays, every element except `string` and `bytes` is padded to a full word. Tuples are
/// not supported.
///
/// ```
/// use abi_codec::encode_packed;
///
/// let encoded = encode_packed(&["uint16", "bool"], &[1u16.into(), true.into()])?;
/// assert_eq!(encoded.to_string(), "0x000101");
/// # Ok::<(), abi_codec::CodecError>(())
/// ```
pub fn encode_packed<T: AsRef<str>>(types: &[T], values: &[AbiValue]) -> Result<Bytes, CodecError> {
    encode_packed_with(types, values, &EncodeOptions::default())
}

/// [`encode_packed`] with explicit [`EncodeOptions`].
pub fn encode_packed_with<T: AsRef<str>>(
    types: &[T],
    values: &[AbiValue],
    options: &EncodeOptions,
) -> Result<Bytes, CodecError> {
    trace!(types = types.len(), "encoding packed values");
    if types.len() != values.len() {
        return Err(EncodingError::LengthMismatch {
            expected: types.len(),
            given: values.len(),
        }
        .into());
    }

    let encoder = PackedEncoder { options };
    let mut buf = BytesMut::new();
    for (ty, value) in types.iter().zip(values) {
        let ty = resolve_packed(ty.as_ref(), options.max_depth)?;
        encoder.encode(&ty, value, false, &mut buf, 0)?;
    }
    trace!(size = buf.len(), "encoded packed values");
    Ok(Bytes::from(buf.freeze()))
}

/// Parses a type string for packed encoding, rejecting tuples at any depth.
pub fn resolve_packed(ty: &str, max_depth: usize) -> Result<AbiType, EncodingError> {
    let unsupported = || EncodingError::UnsupportedPackedAbiType { ty: ty.to_string() };
    let parsed = AbiType::parse_bounded(ty, &[], max_depth).map_err(|err| match err {
        EncodingError::DepthLimitExceeded { .. } => err,
        _ => unsupported(),
    })?;
    if contains_tuple(&parsed) {
        return Err(unsupported());
    }
    Ok(parsed)
}

fn contains_tuple(ty: &AbiType) -> bool {
    match ty {
        AbiType::Tuple(_) => true,
        AbiType::Array(inner, _) => contains_tuple(inner),
        _ => false,
    }
}

struct PackedEncoder<'a> {
    options: &'a EncodeOptions,
}

impl PackedEncoder<'_> {
    fn encode(
        &self,
        ty: &AbiType,
        value: &AbiValue,
        is_array: bool,
        buf: &mut BytesMut,
        depth: usize,
    ) -> Result<(), EncodingError> {
        if depth > self.options.max_depth {
            return Err(EncodingError::DepthLimitExceeded {
                max_depth: self.options.max_depth,
            });
        }
        match ty {
            AbiType::Address => {
                let address = address_bytes(value, self.options.strict_addresses)?;
                if is_array {
                    buf.put_bytes(0, WORD_SIZE - address.len());
                }
                buf.put_slice(&address);
            }
            // neither is widened inside arrays
            AbiType::String => buf.put_slice(string_to_bytes(string_value(value)?)),
            AbiType::Bytes => buf.put_slice(&value_bytes(value)?),
            AbiType::Bool => {
                let flag = bool_to_bytes(bool_value(value)?);
                let size = if is_array { WORD_SIZE } else { 1 };
                buf.put_slice(&pad(&flag, PadDirection::Left, size)?);
            }
            AbiType::Uint(bits) | AbiType::Int(bits) => {
                let signed = matches!(ty, AbiType::Int(_));
                let integer = value.as_integer().ok_or_else(|| EncodingError::InvalidValue {
                    expected: "integer",
                    value: value.to_string(),
                    kind: value.kind(),
                })?;
                // array elements only have to fit the word they are widened to
                let size = if is_array { WORD_SIZE } else { bits / 8 };
                buf.put_slice(&number_to_bytes(&integer, size, signed)?);
            }
            AbiType::FixedBytes(size) => {
                let bytes = fixed_bytes_value(value, *size)?;
                if is_array {
                    buf.put_slice(&pad(&bytes, PadDirection::Right, WORD_SIZE)?);
                } else {
                    buf.put_slice(&bytes);
                }
            }
            AbiType::Array(inner, _) => {
                let AbiValue::Array(items) = value else {
                    return Err(EncodingError::UnsupportedPackedAbiType { ty: ty.to_string() });
                };
                for item in items {
                    self.encode(inner, item, true, buf, depth + 1)?;
                }
            }
            AbiType::Tuple(_) => {
                return Err(EncodingError::UnsupportedPackedAbiType { ty: ty.to_string() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloy_primitives::{address, I256};
    use hex_literal::hex;

    fn packed(types: &[&str], values: &[AbiValue]) -> Result<Bytes, CodecError> {
        encode_packed(types, values)
    }

    #[test]
    fn test_top_level_scalars_are_not_padded() {
        assert_eq!(&packed(&["uint16"], &[1u16.into()]).unwrap()[..], hex!("0001"));
        assert_eq!(&packed(&["int8"], &[(-1i8).into()]).unwrap()[..], hex!("ff"));
        assert_eq!(&packed(&["bool"], &[true.into()]).unwrap()[..], hex!("01"));
        assert_eq!(
            &packed(&["bytes2"], &["0xbeef".into()]).unwrap()[..],
            hex!("beef")
        );
        let addr = address!("1111111111111111111111111111111111111111");
        assert_eq!(
            &packed(&["address"], &[addr.into()]).unwrap()[..],
            hex!("1111111111111111111111111111111111111111")
        );
    }

    #[test]
    fn test_dynamic_values_are_inline() {
        let encoded = packed(
            &["string", "bytes", "string"],
            &["hello".into(), "0x20".into(), "world".into()],
        )
        .unwrap();
        assert_eq!(&encoded[..], b"hello world");
    }

    #[test]
    fn test_array_elements_are_padded() {
        let encoded = packed(
            &["uint8[]", "bool[2]"],
            &[
                AbiValue::Array(vec![1u8.into(), 2u8.into()]),
                AbiValue::Array(vec![true.into(), false.into()]),
            ],
        )
        .unwrap();
        assert_eq!(
            &encoded[..],
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000001"
                "0000000000000000000000000000000000000000000000000000000000000002"
                "0000000000000000000000000000000000000000000000000000000000000001"
                "0000000000000000000000000000000000000000000000000000000000000000"
            )
        );

        let negative = packed(&["int16[]"], &[AbiValue::Array(vec![(-2i16).into()])]).unwrap();
        let mut expected = [0xff; 32];
        expected[31] = 0xfe;
        assert_eq!(&negative[..], expected);
    }

    #[test]
    fn test_array_elements_only_need_to_fit_a_word() {
        let encoded = packed(&["uint8[]"], &[AbiValue::Array(vec![256u16.into()])]).unwrap();
        assert_eq!(
            &encoded[..],
            hex!("0000000000000000000000000000000000000000000000000000000000000100")
        );

        let encoded = packed(&["int8[1]"], &[AbiValue::Array(vec![(-300i16).into()])]).unwrap();
        let mut expected = [0xff; 32];
        expected[30] = 0xfe;
        expected[31] = 0xd4;
        assert_eq!(&encoded[..], expected);

        let err = packed(&["uint8[]"], &[AbiValue::Array(vec![(-1i8).into()])]).unwrap_err();
        assert!(matches!(err, CodecError::Encoding(EncodingError::IntegerOutOfRange { .. })));
    }

    #[test]
    fn test_fixed_arrays_are_not_length_checked() {
        let short = packed(&["bool[3]"], &[AbiValue::Array(vec![true.into()])]).unwrap();
        assert_eq!(
            &short[..],
            hex!("0000000000000000000000000000000000000000000000000000000000000001")
        );
        let long = packed(
            &["uint16[1]"],
            &[AbiValue::Array(vec![1u16.into(), 2u16.into()])],
        )
        .unwrap();
        assert_eq!(long.len(), 64);
        assert_eq!(long[31], 1);
        assert_eq!(long[63], 2);
    }

    #[test]
    fn test_deep_type_strings_fail_gracefully() {
        let deep = alloc::format!("uint8{}", "[]".repeat(200_000));
        let err = packed(&[deep.as_str()], &[AbiValue::Array(vec![])]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Encoding(EncodingError::DepthLimitExceeded { max_depth: 64 })
        );
    }

    #[test]
    fn test_array_of_addresses_and_fixed_bytes() {
        let encoded = packed(
            &["address[]", "bytes2[]"],
            &[
                AbiValue::Array(vec![address!("2222222222222222222222222222222222222222").into()]),
                AbiValue::Array(vec!["0xbeef".into()]),
            ],
        )
        .unwrap();
        assert_eq!(
            &encoded[..],
            hex!(
                "0000000000000000000000002222222222222222222222222222222222222222"
                "beef000000000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn test_strings_in_arrays_stay_unpadded() {
        let encoded = packed(
            &["string[]"],
            &[AbiValue::Array(vec!["gm".into(), "gn".into()])],
        )
        .unwrap();
        assert_eq!(&encoded[..], b"gmgn");
    }

    #[test]
    fn test_empty_array() {
        let encoded = packed(&["uint256[]"], &[AbiValue::Array(vec![])]).unwrap();
        assert_eq!(encoded.to_string(), "0x");
    }

    #[test]
    fn test_tuple_rejected() {
        for ty in ["tuple", "tuple[]", "tuple[2][]"] {
            let err = packed(&[ty], &[AbiValue::named::<_, &str>([])]).unwrap_err();
            assert_eq!(
                err,
                CodecError::Encoding(EncodingError::UnsupportedPackedAbiType { ty: ty.into() })
            );
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = packed(&["uint7"], &[1u8.into()]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Encoding(EncodingError::UnsupportedPackedAbiType { ty: "uint7".into() })
        );
    }

    #[test]
    fn test_non_array_value_for_array_type() {
        let err = packed(&["uint8[]"], &[1u8.into()]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Encoding(EncodingError::UnsupportedPackedAbiType { ty: "uint8[]".into() })
        );
    }

    #[test]
    fn test_errors() {
        let err = packed(&["uint8", "bool"], &[1u8.into()]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Encoding(EncodingError::LengthMismatch { expected: 2, given: 1 })
        );

        let err = packed(&["bytes4"], &["0xbeef".into()]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Encoding(EncodingError::BytesSizeMismatch { expected: 4, given: 2, .. })
        ));

        let err = packed(&["address"], &["0x1234".into()]).unwrap_err();
        assert!(matches!(err, CodecError::Encoding(EncodingError::InvalidAddress { .. })));

        let err = packed(&["uint8"], &[256u16.into()]).unwrap_err();
        assert!(matches!(err, CodecError::Encoding(EncodingError::IntegerOutOfRange { .. })));

        let min = packed(&["int256"], &[AbiValue::Int(I256::MIN)]).unwrap();
        assert_eq!(min[0], 0x80);
    }
}
