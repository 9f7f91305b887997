use alloy::primitives::{Address, FixedBytes};

/// A convenience trait which encodes a given EVM type into a sized, lowercase hex string.
pub trait ToLowerHex {
    fn to_lower_hex(&self) -> String;
}

impl ToLowerHex for FixedBytes<32> {
    fn to_lower_hex(&self) -> String {
        format!("{:#032x}", self)
    }
}

impl ToLowerHex for Address {
    fn to_lower_hex(&self) -> String {
        format!("{:#020x}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};

    #[test]
    fn test_address_to_lower_hex() {
        let addr = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
        assert_eq!(addr.to_lower_hex(), "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984");
    }

    #[test]
    fn test_word_to_lower_hex() {
        let word = b256!("00000000000000000000000000000000000000000000000000000000000000ff");
        assert_eq!(
            word.to_lower_hex(),
            "0x00000000000000000000000000000000000000000000000000000000000000ff"
        );
    }
}
