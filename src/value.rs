use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use alloy_primitives::{Address, Bytes, FixedBytes, I256, U256};
use hashbrown::HashMap;

/// A runtime value to be encoded against an ABI type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Bool(bool),
    Uint(U256),
    Int(I256),
    /// UTF-8 text for `string` slots; `0x` hex text is also accepted in `address`
    /// and `bytes` slots.
    String(String),
    Bytes(Bytes),
    Address(Address),
    Array(Vec<AbiValue>),
    /// Tuple whose values are matched to components by position.
    Tuple(Vec<AbiValue>),
    /// Tuple whose values are matched to components by name.
    NamedTuple(HashMap<String, AbiValue>),
}

impl AbiValue {
    /// Short name of the variant, used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Address(_) => "address",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::NamedTuple(_) => "named tuple",
        }
    }

    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Uint(value) => Some(Integer::from(*value)),
            Self::Int(value) => Some(Integer::from(*value)),
            _ => None,
        }
    }

    /// Builds a named tuple from `(name, value)` pairs.
    pub fn named<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, AbiValue)>,
        K: Into<String>,
    {
        Self::NamedTuple(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Bytes(value) => write!(f, "{value}"),
            Self::Address(value) => write!(f, "{}", value.to_checksum(None)),
            Self::Array(values) => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
            Self::Tuple(values) => {
                f.write_str("(")?;
                write_list(f, values)?;
                f.write_str(")")
            }
            Self::NamedTuple(fields) => {
                // sorted so the rendering does not depend on hasher state
                let mut fields: Vec<_> = fields.iter().collect();
                fields.sort_by(|a, b| a.0.cmp(b.0));
                f.write_str("{")?;
                for (i, (name, value)) in fields.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[AbiValue]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// Sign and magnitude of an integer value, wide enough to hold both `uint256` and
/// `int256` inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }
}

impl From<U256> for Integer {
    fn from(value: U256) -> Self {
        Self {
            negative: false,
            magnitude: value,
        }
    }
}

impl From<I256> for Integer {
    fn from(value: I256) -> Self {
        Self {
            negative: value.is_negative(),
            magnitude: value.unsigned_abs(),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

/// Conversion of Rust values into [`AbiValue`]s.
///
/// Implemented for the primitive types, the `alloy_primitives` value types, strings,
/// vectors and arrays. `#[derive(AbiTuple)]` implements it for structs.
pub trait ToAbiValue {
    fn to_abi_value(&self) -> AbiValue;
}

impl ToAbiValue for AbiValue {
    fn to_abi_value(&self) -> AbiValue {
        self.clone()
    }
}

impl ToAbiValue for bool {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Bool(*self)
    }
}

macro_rules! impl_unsigned {
    ($($typ:ty),+) => {$(
        impl ToAbiValue for $typ {
            fn to_abi_value(&self) -> AbiValue {
                AbiValue::Uint(U256::from(*self))
            }
        }
    )+};
}

macro_rules! impl_signed {
    ($($typ:ty),+) => {$(
        impl ToAbiValue for $typ {
            fn to_abi_value(&self) -> AbiValue {
                let magnitude = I256::from_raw(U256::from(self.unsigned_abs()));
                AbiValue::Int(if *self < 0 { -magnitude } else { magnitude })
            }
        }
    )+};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

impl ToAbiValue for U256 {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Uint(*self)
    }
}

impl ToAbiValue for I256 {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Int(*self)
    }
}

impl ToAbiValue for Address {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Address(*self)
    }
}

impl ToAbiValue for Bytes {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Bytes(self.clone())
    }
}

impl<const N: usize> ToAbiValue for FixedBytes<N> {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Bytes(Bytes::copy_from_slice(self.as_slice()))
    }
}

impl ToAbiValue for String {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::String(self.clone())
    }
}

impl ToAbiValue for &str {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::String(self.to_string())
    }
}

impl<T: ToAbiValue> ToAbiValue for Vec<T> {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Array(self.iter().map(ToAbiValue::to_abi_value).collect())
    }
}

impl<T: ToAbiValue, const N: usize> ToAbiValue for [T; N] {
    fn to_abi_value(&self) -> AbiValue {
        AbiValue::Array(self.iter().map(ToAbiValue::to_abi_value).collect())
    }
}

macro_rules! impl_from_value {
    ($($typ:ty),+) => {$(
        impl From<$typ> for AbiValue {
            fn from(value: $typ) -> Self {
                value.to_abi_value()
            }
        }
    )+};
}

impl_from_value!(
    bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, U256, I256, Address,
    Bytes, String, &str
);
