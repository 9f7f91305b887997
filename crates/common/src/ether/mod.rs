/// Block-explorer ABI lookups.
pub mod etherscan;

/// Chain client abstraction and its JSON-RPC realization.
pub mod provider;

/// EIP-1967 proxy detection.
pub mod proxy;

/// Batched storage-slot retrieval.
pub mod slots;

/// Storage word decoding and derived-slot arithmetic.
pub mod types;
