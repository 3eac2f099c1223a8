use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    encoder::{concat_prepared, encode_params, ParamEncoder, PreparedParam},
    error::EncodingError,
    types::AbiType,
    value::AbiValue,
};

impl ParamEncoder<'_> {
    /// Encodes a tuple, matching values to components by position (`Tuple`, `Array`) or by
    /// name (`NamedTuple`).
    pub(crate) fn encode_tuple(
        &self,
        components: &[(String, AbiType)],
        value: &AbiValue,
        depth: usize,
    ) -> Result<PreparedParam, EncodingError> {
        let values = tuple_values(components, value)?;
        let prepared = self.prepare_all(
            components.iter().map(|(_, ty)| ty).zip(values),
            depth + 1,
        )?;

        if prepared.iter().any(|param| param.dynamic) {
            return Ok(PreparedParam::dynamic(encode_params(&prepared)));
        }
        Ok(PreparedParam::fixed(concat_prepared(&prepared)))
    }
}

fn tuple_values<'v>(
    components: &[(String, AbiType)],
    value: &'v AbiValue,
) -> Result<Vec<&'v AbiValue>, EncodingError> {
    match value {
        AbiValue::Tuple(values) | AbiValue::Array(values) => {
            if values.len() != components.len() {
                return Err(EncodingError::LengthMismatch {
                    expected: components.len(),
                    given: values.len(),
                });
            }
            Ok(values.iter().collect())
        }
        AbiValue::NamedTuple(fields) => components
            .iter()
            .map(|(name, _)| {
                fields
                    .get(name)
                    .ok_or_else(|| EncodingError::MissingComponent { name: name.clone() })
            })
            .collect(),
        _ => Err(EncodingError::InvalidValue {
            expected: "tuple",
            value: value.to_string(),
            kind: value.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EncodeOptions, encoder::prepare_param};
    use alloc::vec;
    use hex_literal::hex;

    fn tuple(fields: &[(&str, AbiType)]) -> AbiType {
        AbiType::Tuple(
            fields
                .iter()
                .map(|(name, ty)| (String::from(*name), ty.clone()))
                .collect(),
        )
    }

    fn prepare(ty: &AbiType, value: AbiValue) -> Result<PreparedParam, EncodingError> {
        prepare_param(ty, &value, &EncodeOptions::default())
    }

    #[test]
    fn test_static_tuple_is_inline() {
        let ty = tuple(&[("a", AbiType::Uint(256)), ("b", AbiType::Bool)]);
        let prepared = prepare(&ty, AbiValue::Tuple(vec![420u64.into(), true.into()])).unwrap();
        assert!(!prepared.dynamic);
        assert_eq!(
            &prepared.encoded[..],
            hex!(
                "00000000000000000000000000000000000000000000000000000000000001a4"
                "0000000000000000000000000000000000000000000000000000000000000001"
            )
        );
    }

    #[test]
    fn test_dynamic_tuple_uses_head_tail() {
        let ty = tuple(&[("name", AbiType::String), ("amount", AbiType::Uint(256))]);
        let prepared = prepare(&ty, AbiValue::Tuple(vec!["wagmi".into(), 1u8.into()])).unwrap();
        assert!(prepared.dynamic);
        assert_eq!(
            &prepared.encoded[..],
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000040"
                "0000000000000000000000000000000000000000000000000000000000000001"
                "0000000000000000000000000000000000000000000000000000000000000005"
                "7761676d69000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn test_named_and_positional_agree() {
        let ty = tuple(&[("to", AbiType::Uint(8)), ("memo", AbiType::String)]);
        let positional = prepare(&ty, AbiValue::Tuple(vec![7u8.into(), "gm".into()])).unwrap();
        let as_array = prepare(&ty, AbiValue::Array(vec![7u8.into(), "gm".into()])).unwrap();
        let named = prepare(
            &ty,
            AbiValue::named([("memo", AbiValue::from("gm")), ("to", AbiValue::from(7u8))]),
        )
        .unwrap();
        assert_eq!(positional, named);
        assert_eq!(positional, as_array);
    }

    #[test]
    fn test_missing_named_component() {
        let ty = tuple(&[("to", AbiType::Uint(8)), ("memo", AbiType::String)]);
        let err = prepare(&ty, AbiValue::named([("to", AbiValue::from(7u8))])).unwrap_err();
        assert_eq!(err, EncodingError::MissingComponent { name: "memo".into() });
    }

    #[test]
    fn test_positional_arity() {
        let ty = tuple(&[("a", AbiType::Bool), ("b", AbiType::Bool)]);
        let err = prepare(&ty, AbiValue::Tuple(vec![true.into()])).unwrap_err();
        assert_eq!(err, EncodingError::LengthMismatch { expected: 2, given: 1 });

        let err = prepare(&ty, true.into()).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidValue { expected: "tuple", .. }));
    }

    #[test]
    fn test_empty_tuple() {
        let prepared = prepare(&tuple(&[]), AbiValue::Tuple(vec![])).unwrap();
        assert!(!prepared.dynamic);
        assert!(prepared.encoded.is_empty());
    }
}
