//! Common errors

/// Generic error type for slotlens common operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic error
    #[error("Error: {0}")]
    Generic(String),
    /// Failed to parse the given input
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The node accepted the connection but rejected the request
    #[error("RPC error: {0}")]
    RpcError(String),
    /// The node could not be reached at all
    #[error("Transport error: {0}")]
    TransportError(String),
}
