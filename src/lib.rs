#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;
extern crate self as abi_codec;

pub mod address;
pub mod align;
pub mod bytes;
pub mod config;
pub mod encoder;
pub mod error;
pub mod function;
pub mod packed;
pub mod parse;
pub mod primitive;
mod tuple;
pub mod types;
pub mod value;
mod vec;


pub use address::is_address;
pub use config::EncodeOptions;
pub use encoder::{encode_abi_parameters, encode_abi_parameters_with, PreparedParam};
pub use error::{CodecError, EncodingError, ParseError};
pub use function::Function;
pub use packed::{encode_packed, encode_packed_with};
pub use parse::{parse_abi_parameter, parse_abi_parameters};
pub use types::{get_array_components, AbiParameter, AbiType};
pub use value::{AbiValue, ToAbiValue};

#[cfg(feature = "derive")]
pub use codec_derive::AbiTuple;
