use slotlens_common::error::Error as CommonError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target is not a syntactically valid address
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    /// The target holds no contract code
    #[error("No contract code: {0}")]
    NoCode(String),
    /// The configured node could not be reached
    #[error("Transport error: {0}")]
    Transport(String),
    /// The node rejected a request
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

impl From<CommonError> for Error {
    fn from(value: CommonError) -> Self {
        match value {
            CommonError::TransportError(e) => Error::Transport(e),
            CommonError::RpcError(e) => Error::Rpc(e),
            CommonError::ParseError(e) => Error::Eyre(eyre::eyre!("parse error: {e}")),
            CommonError::Generic(e) => Error::Eyre(eyre::eyre!(e)),
        }
    }
}
