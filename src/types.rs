use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{config::DEFAULT_MAX_DEPTH, error::EncodingError};

/// A named, typed slot of a function or tuple signature, as found in contract ABI JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbiParameter {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub components: Vec<AbiParameter>,
}

impl AbiParameter {
    /// An unnamed parameter of type `ty`.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            ty: ty.into(),
            components: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(ty)
        }
    }

    /// A `tuple` parameter (or `tuple[]`, `tuple[2]`, ... when `ty` says so).
    pub fn tuple(ty: impl Into<String>, components: Vec<AbiParameter>) -> Self {
        Self {
            components,
            ..Self::new(ty)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parses the type string (and the components of tuple types) into an [`AbiType`].
    pub fn resolve(&self) -> Result<AbiType, EncodingError> {
        self.resolve_with(DEFAULT_MAX_DEPTH)
    }

    /// Like [`resolve`](Self::resolve), failing with `DepthLimitExceeded` once arrays and
    /// tuples nest deeper than `max_depth`.
    pub fn resolve_with(&self, max_depth: usize) -> Result<AbiType, EncodingError> {
        AbiType::parse_bounded(&self.ty, &self.components, max_depth)
    }
}

/// Splits a trailing array suffix off a type string.
///
/// Returns the declared length (`None` for `T[]`) and the inner type, or `None` when the
/// type is not an array.
///
/// ```
/// use abi_codec::get_array_components;
///
/// assert_eq!(get_array_components("uint8[3]"), Some((Some(3), "uint8")));
/// assert_eq!(get_array_components("tuple[2][]"), Some((None, "tuple[2]")));
/// assert_eq!(get_array_components("address"), None);
/// ```
pub fn get_array_components(ty: &str) -> Option<(Option<usize>, &str)> {
    let body = ty.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let (inner, digits) = (&body[..open], &body[open + 1..]);
    if inner.is_empty() {
        return None;
    }
    if digits.is_empty() {
        return Some((None, inner));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|len| (Some(len), inner))
}

/// The closed set of types understood by the encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    Address,
    Bool,
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Signed integer of the given bit width.
    Int(usize),
    /// `bytesN`, `1 <= N <= 32`.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[k]` when the length is known, `T[]` otherwise.
    Array(Box<AbiType>, Option<usize>),
    /// Named components of a tuple.
    Tuple(Vec<(String, AbiType)>),
}

impl AbiType {
    /// Parses a type string. `components` are only consulted when the (innermost) type is
    /// `tuple`.
    pub fn parse(ty: &str, components: &[AbiParameter]) -> Result<Self, EncodingError> {
        Self::parse_bounded(ty, components, DEFAULT_MAX_DEPTH)
    }

    /// Parses a type string, counting one level per array suffix and per tuple.
    pub fn parse_bounded(
        ty: &str,
        components: &[AbiParameter],
        max_depth: usize,
    ) -> Result<Self, EncodingError> {
        Self::parse_at(ty, components, 0, max_depth)
    }

    fn parse_at(
        ty: &str,
        components: &[AbiParameter],
        mut depth: usize,
        max_depth: usize,
    ) -> Result<Self, EncodingError> {
        let exceeded = || EncodingError::DepthLimitExceeded { max_depth };
        if depth > max_depth {
            return Err(exceeded());
        }

        // outermost dimension first
        let mut dims = Vec::new();
        let mut base = ty;
        while let Some((len, inner)) = get_array_components(base) {
            depth += 1;
            if depth > max_depth {
                return Err(exceeded());
            }
            dims.push(len);
            base = inner;
        }

        let base = if base == "tuple" {
            let fields = components
                .iter()
                .map(|c| {
                    let ty = Self::parse_at(&c.ty, &c.components, depth + 1, max_depth)?;
                    Ok((c.name.clone(), ty))
                })
                .collect::<Result<_, EncodingError>>()?;
            Self::Tuple(fields)
        } else {
            Self::parse_elementary(base).ok_or_else(|| EncodingError::InvalidAbiEncodingType {
                ty: base.to_string(),
            })?
        };
        Ok(dims
            .into_iter()
            .rev()
            .fold(base, |inner, len| Self::Array(Box::new(inner), len)))
    }

    fn parse_elementary(ty: &str) -> Option<Self> {
        match ty {
            "address" => return Some(Self::Address),
            "bool" => return Some(Self::Bool),
            "string" => return Some(Self::String),
            "bytes" => return Some(Self::Bytes),
            _ => {}
        }
        if let Some(bits) = ty.strip_prefix("uint") {
            return parse_int_width(bits).map(Self::Uint);
        }
        if let Some(bits) = ty.strip_prefix("int") {
            return parse_int_width(bits).map(Self::Int);
        }
        if let Some(size) = ty.strip_prefix("bytes") {
            return parse_decimal(size)
                .filter(|size| (1..=32).contains(size))
                .map(Self::FixedBytes);
        }
        None
    }

    /// Whether values of this type are encoded out of line with an offset word.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_, None) => true,
            Self::Array(inner, Some(_)) => inner.is_dynamic(),
            Self::Tuple(fields) => fields.iter().any(|(_, ty)| ty.is_dynamic()),
            _ => false,
        }
    }

    /// Canonical spelling used in function signatures, e.g. `(uint256,address)[]`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::Array(inner, Some(len)) => write!(f, "{inner}[{len}]"),
            Self::Array(inner, None) => write!(f, "{inner}[]"),
            Self::Tuple(fields) => {
                let inner: Vec<String> = fields.iter().map(|(_, ty)| format!("{ty}")).collect();
                write!(f, "({})", inner.join(","))
            }
        }
    }
}

fn parse_decimal(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0')
    {
        return None;
    }
    digits.parse().ok()
}

// an omitted width means 256
fn parse_int_width(bits: &str) -> Option<usize> {
    if bits.is_empty() {
        return Some(256);
    }
    parse_decimal(bits).filter(|bits| bits % 8 == 0 && (8..=256).contains(bits))
}
