//! EIP-1967 proxy detection.

use alloy::primitives::{Address, B256};
use tracing::debug;

use crate::{
    constants::{EIP1967_ADMIN_SLOT, EIP1967_IMPLEMENTATION_SLOT},
    ether::provider::ChainClient,
};

/// The proxy pattern recognized for a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// EIP-1967 transparent/UUPS proxy, detected via the fixed storage slots.
    Eip1967,
    /// Reserved for proxy patterns without a fixed detection slot. Detection
    /// never produces this today.
    Custom,
}

/// Result of proxy detection against a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyInfo {
    /// Whether the contract was recognized as a proxy.
    pub is_proxy: bool,
    /// The recognized pattern, when `is_proxy` is set.
    pub kind: Option<ProxyKind>,
    /// The implementation address read from the implementation slot.
    pub implementation: Option<Address>,
    /// The admin address read from the admin slot, when non-zero.
    pub admin: Option<Address>,
}

/// Detect whether `address` is an EIP-1967 proxy by reading the fixed
/// implementation and admin slots at the latest block. A zero implementation
/// slot means "not a proxy". Detection is advisory: any failure degrades to
/// `ProxyInfo::default()` rather than propagating.
pub async fn detect_proxy(client: &dyn ChainClient, address: Address) -> ProxyInfo {
    let implementation_word =
        match client.read_word(address, EIP1967_IMPLEMENTATION_SLOT, None).await {
            Ok(word) => word,
            Err(e) => {
                debug!("proxy detection for {} failed: {}", address, e);
                return ProxyInfo::default();
            }
        };

    if implementation_word.is_zero() {
        return ProxyInfo::default();
    }

    let implementation = Address::from_word(implementation_word);

    // a failed or empty admin read never blocks detection
    let admin = match client.read_word(address, EIP1967_ADMIN_SLOT, None).await {
        Ok(word) if !word.is_zero() => Some(Address::from_word(word)),
        Ok(_) => None,
        Err(e) => {
            debug!("admin slot read for {} failed: {}", address, e);
            None
        }
    };

    ProxyInfo {
        is_proxy: true,
        kind: Some(ProxyKind::Eip1967),
        implementation: Some(implementation),
        admin,
    }
}
