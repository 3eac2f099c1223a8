use alloc::string::String;
use alloy_primitives::{I256, U256};
use thiserror::Error;

const TYPES_DOCS: &str = "https://docs.soliditylang.org/en/latest/abi-spec.html#types";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Parsing error: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("ABI encoding params/values length mismatch: expected {expected} values, got {given}")]
    LengthMismatch { expected: usize, given: usize },

    #[error("Type \"{ty}\" is not a valid encoding type. Please provide a valid ABI type. Docs: {}", TYPES_DOCS)]
    InvalidAbiEncodingType { ty: String },

    #[error("Address \"{value}\" is invalid")]
    InvalidAddress { value: String },

    #[error("Value \"{value}\" is not a valid array")]
    InvalidArray { value: String },

    #[error("ABI encoding array length mismatch for type {ty}: expected {expected}, got {given}")]
    ArrayLengthMismatch {
        expected: usize,
        given: usize,
        ty: String,
    },

    #[error("Size of bytes \"{value}\" ({given}) does not match expected size (bytes{expected})")]
    BytesSizeMismatch {
        expected: usize,
        given: usize,
        value: String,
    },

    #[error("Number \"{value}\" is not in safe {size}-byte {} integer range ({min} to {max})", signedness(.signed))]
    IntegerOutOfRange {
        max: U256,
        min: I256,
        signed: bool,
        size: usize,
        value: String,
    },

    #[error("Type \"{ty}\" is not supported for packed encoding")]
    UnsupportedPackedAbiType { ty: String },

    #[error("Invalid boolean value: \"{value}\" (type: {kind}). Expected: `true` or `false`")]
    InvalidBool { value: String, kind: &'static str },

    #[error("Invalid {expected} value: \"{value}\" (type: {kind})")]
    InvalidValue {
        expected: &'static str,
        value: String,
        kind: &'static str,
    },

    #[error("Tuple component \"{name}\" has no value")]
    MissingComponent { name: String },

    #[error("Size ({size}) exceeds padding size ({target})")]
    InvalidSize { size: usize, target: usize },

    #[error("Slice [{start}..{end}] is out of bounds for {size} bytes")]
    SliceOutOfBounds {
        start: usize,
        end: usize,
        size: usize,
    },

    #[error("Value \"{value}\" is not a valid hex string")]
    InvalidHex { value: String },

    #[error("Type nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid parameter declaration: {0}")]
    InvalidParameter(String),

    #[error("Invalid function signature: {0}")]
    InvalidSignature(String),
}

fn signedness(signed: &bool) -> &'static str {
    if *signed {
        "signed"
    } else {
        "unsigned"
    }
}
