use alloy::primitives::{I256, U256};

/// Reinterprets an unsigned 256-bit word as a signed integer, in two's
/// complement. Values above `2^255 - 1` come back negative.
///
/// ```
/// use slotlens_common::utils::strings::sign_uint;
/// use alloy::primitives::U256;
///
/// let result = sign_uint(U256::MAX);
/// assert_eq!(result.to_string(), "-1");
/// ```
pub fn sign_uint(unsigned: U256) -> I256 {
    I256::from_raw(unsigned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_uint_positive() {
        let unsigned = U256::from(10);
        let signed = sign_uint(unsigned);
        assert_eq!(signed, I256::try_from(10).expect("invalid i256"));
    }

    #[test]
    fn test_sign_uint_negative() {
        let unsigned = U256::MAX;
        let signed = sign_uint(unsigned);
        assert_eq!(signed, I256::try_from(-1).expect("invalid i256"));
    }

    #[test]
    fn test_sign_uint_zero() {
        let unsigned = U256::ZERO;
        let signed = sign_uint(unsigned);
        assert_eq!(signed, I256::ZERO);
    }
}
