//! Parsing of human-readable parameter lists such as `address to, (uint256,bool)[] c`,
//! on top of the Solidity type grammar from `alloy-json-abi`.
//!
//! Tuple components written inline carry types only, so parsed components are unnamed
//! and tuple values for them are matched by position.

use alloc::{format, string::ToString, vec::Vec};
use core::fmt::Write;

use alloy_json_abi::{
    parser::{ParameterSpecifier, Parameters, TypeSpecifier, TypeStem},
    Param,
};

use crate::{error::ParseError, types::AbiParameter};

/// Parses a comma-separated parameter list.
///
/// ```
/// use abi_codec::parse_abi_parameters;
///
/// let params = parse_abi_parameters("address to, (uint256, string)[] items")?;
/// assert_eq!(params[0].ty, "address");
/// assert_eq!(params[1].ty, "tuple[]");
/// assert_eq!(params[1].name, "items");
/// assert_eq!(params[1].components[1].ty, "string");
/// # Ok::<(), abi_codec::ParseError>(())
/// ```
pub fn parse_abi_parameters(input: &str) -> Result<Vec<AbiParameter>, ParseError> {
    let list = format!("({})", input.trim());
    let parameters = Parameters::parse(&list)
        .map_err(|err| ParseError::InvalidParameter(err.to_string()))?;
    Ok(parameters.params.iter().map(from_specifier).collect())
}

/// Parses a single parameter declaration such as `uint256[2] amounts`.
pub fn parse_abi_parameter(input: &str) -> Result<AbiParameter, ParseError> {
    ParameterSpecifier::parse(input.trim())
        .map(|spec| from_specifier(&spec))
        .map_err(|err| ParseError::InvalidParameter(err.to_string()))
}

fn from_specifier(spec: &ParameterSpecifier<'_>) -> AbiParameter {
    from_type(&spec.ty).with_name(spec.name.unwrap_or_default())
}

fn from_type(ty: &TypeSpecifier<'_>) -> AbiParameter {
    let mut param = match &ty.stem {
        TypeStem::Root(root) => AbiParameter::new(root.span()),
        TypeStem::Tuple(tuple) => {
            AbiParameter::tuple("tuple", tuple.types.iter().map(from_type).collect())
        }
    };
    // sizes run innermost first, matching the suffix order
    for size in &ty.sizes {
        match size {
            Some(len) => {
                let _ = write!(param.ty, "[{len}]");
            }
            None => param.ty.push_str("[]"),
        }
    }
    param
}

impl From<Param> for AbiParameter {
    fn from(param: Param) -> Self {
        Self {
            name: param.name,
            ty: param.ty,
            components: param.components.into_iter().map(Self::from).collect(),
        }
    }
}
