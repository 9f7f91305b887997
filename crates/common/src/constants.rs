use alloy::primitives::{b256, B256};
use fancy_regex::Regex;
use lazy_static::lazy_static;

/// The EIP-1967 implementation slot, `keccak256("eip1967.proxy.implementation") - 1`.
/// A non-zero word here marks the contract as an EIP-1967 proxy.
pub const EIP1967_IMPLEMENTATION_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// The EIP-1967 admin slot, `keccak256("eip1967.proxy.admin") - 1`.
pub const EIP1967_ADMIN_SLOT: B256 =
    b256!("b53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103");

/// Number of storage slots fetched concurrently within a single batch group.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Pause between batch groups, in milliseconds, so sequential groups do not
/// hammer the upstream node.
pub const BATCH_PAUSE_MS: u64 = 100;

/// Default number of sequential slots crawled when no ceiling is given.
pub const DEFAULT_CRAWL_SLOTS: usize = 500;

/// Hard upper bound on the crawl ceiling.
pub const MAX_CRAWL_SLOTS: usize = 1000;

/// Hard upper bound on the length of an explicit slot list.
pub const MAX_SLOT_LIST: usize = 100;

lazy_static! {
    /// The following regex is used to validate Ethereum addresses
    pub static ref ADDRESS_REGEX: Regex =
        Regex::new(r"^(0x)?[0-9a-fA-F]{40}$").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_regex() {
        assert!(ADDRESS_REGEX
            .is_match("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984")
            .expect("regex failed"));
        assert!(ADDRESS_REGEX
            .is_match("1f9840a85d5af5bf1d1762f925bdaddc4201f984")
            .expect("regex failed"));
        assert!(!ADDRESS_REGEX.is_match("0x1f9840a85d5af5bf1d1762f925bdaddc4201f9")
            .expect("regex failed"));
        assert!(!ADDRESS_REGEX.is_match("hello world").expect("regex failed"));
    }
}
