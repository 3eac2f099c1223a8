use alloy_primitives::{hex, Address};

/// Checks that `value` is a `0x`-prefixed, 20-byte hex address.
///
/// With `strict` set, a mixed-case address must carry a valid EIP-55 checksum.
/// All-lowercase and all-uppercase spellings carry no checksum and are accepted.
pub fn is_address(value: &str, strict: bool) -> bool {
    parse_address(value, strict).is_some()
}

/// Parses an address accepted by [`is_address`].
pub fn parse_address(value: &str, strict: bool) -> Option<Address> {
    let digits = value.strip_prefix("0x")?;
    if digits.len() != 40 {
        return None;
    }
    let mut raw = [0u8; 20];
    hex::decode_to_slice(digits, &mut raw).ok()?;
    let address = Address::from(raw);

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if strict && has_lower && has_upper && address.to_checksum(None) != value {
        return None;
    }
    Some(address)
}
