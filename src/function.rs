use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use alloy_primitives::{keccak256, Bytes};
use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::{
    config::EncodeOptions,
    encoder::{encode_params, prepare_params},
    error::{CodecError, EncodingError, ParseError},
    types::AbiParameter,
    value::AbiValue,
};

/// A contract function: its name and the parameters it takes and returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inputs: Vec<AbiParameter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<AbiParameter>,
}

impl Function {
    /// Parses a human-readable signature.
    ///
    /// ```
    /// use abi_codec::Function;
    ///
    /// let transfer = Function::parse("function transfer(address to, uint256 amount) external returns (bool)")?;
    /// assert_eq!(transfer.signature()?, "transfer(address,uint256)");
    /// assert_eq!(transfer.selector()?, [0xa9, 0x05, 0x9c, 0xbb]);
    /// # Ok::<(), abi_codec::CodecError>(())
    /// ```
    pub fn parse(signature: &str) -> Result<Self, ParseError> {
        let parsed = alloy_json_abi::Function::parse(signature.trim())
            .map_err(|err| ParseError::InvalidSignature(err.to_string()))?;
        Ok(Self::from(parsed))
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> Result<String, EncodingError> {
        let inputs = self
            .inputs
            .iter()
            .map(|param| param.resolve().map(|ty| ty.canonical()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", self.name, inputs.join(",")))
    }

    /// First four bytes of the keccak-256 hash of the canonical signature.
    pub fn selector(&self) -> Result<[u8; 4], EncodingError> {
        let hash = keccak256(self.signature()?.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);
        Ok(selector)
    }

    /// Calldata for a call: the selector followed by the encoded arguments.
    pub fn encode_input(&self, values: &[AbiValue]) -> Result<Bytes, CodecError> {
        self.encode_input_with(values, &EncodeOptions::default())
    }

    pub fn encode_input_with(
        &self,
        values: &[AbiValue],
        options: &EncodeOptions,
    ) -> Result<Bytes, CodecError> {
        let selector = self.selector()?;
        let prepared = prepare_params(&self.inputs, values, options)?;
        let args = encode_params(&prepared);
        debug!(function = %self.name, size = 4 + args.len(), "encoded function input");

        let mut buf = BytesMut::with_capacity(4 + args.len());
        buf.put_slice(&selector);
        buf.unsplit(args);
        Ok(Bytes::from(buf.freeze()))
    }
}

impl From<alloy_json_abi::Function> for Function {
    fn from(function: alloy_json_abi::Function) -> Self {
        Self {
            name: function.name,
            inputs: function.inputs.into_iter().map(AbiParameter::from).collect(),
            outputs: function.outputs.into_iter().map(AbiParameter::from).collect(),
        }
    }
}
