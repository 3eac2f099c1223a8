/// Default bound on how deeply arrays and tuples may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs shared by [`encode_abi_parameters_with`](crate::encode_abi_parameters_with) and
/// [`encode_packed_with`](crate::encode_packed_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Reject mixed-case address strings whose EIP-55 checksum does not match.
    pub strict_addresses: bool,
    /// Maximum nesting of arrays and tuples before encoding fails with
    /// [`EncodingError::DepthLimitExceeded`](crate::EncodingError::DepthLimitExceeded).
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            strict_addresses: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn strict_addresses(mut self, strict: bool) -> Self {
        self.strict_addresses = strict;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
