//! Chain client abstraction over an upstream JSON-RPC node.
use alloy::{
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, B256},
    providers::{Provider, ProviderBuilder, RootProvider},
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;

use crate::error::Error;

/// Read-only view of chain state needed by the storage engine.
///
/// All operations distinguish transport failures (node unreachable) from RPC
/// failures (node accepted the connection but rejected the request), so
/// callers can map the former to a connectivity error and the latter to bad
/// input. No retries happen at this layer.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Read a single storage word, optionally pinned to a block height.
    async fn read_word(
        &self,
        address: Address,
        slot: B256,
        block: Option<u64>,
    ) -> Result<B256, Error>;

    /// Fetch the deployed bytecode at the given address.
    async fn read_code(&self, address: Address) -> Result<Vec<u8>, Error>;

    /// The latest block height known to the node.
    async fn block_height(&self) -> Result<u64, Error>;

    /// The chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// Whether the address has deployed code.
    async fn is_contract(&self, address: Address) -> Result<bool, Error> {
        Ok(!self.read_code(address).await?.is_empty())
    }
}

/// [`NodeClient`] is a [`ChainClient`] backed by a JSON-RPC [`Provider`].
#[derive(Clone, Debug)]
pub struct NodeClient {
    provider: RootProvider<Ethereum>,
}

impl NodeClient {
    /// Connect to a node using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self, Error> {
        if rpc_url.is_empty() {
            return Err(Error::TransportError("no RPC URL provided".to_string()));
        }

        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(map_transport_error)?
            .root()
            .clone();
        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainClient for NodeClient {
    async fn read_word(
        &self,
        address: Address,
        slot: B256,
        block: Option<u64>,
    ) -> Result<B256, Error> {
        let call = self.provider.get_storage_at(address, slot.into());
        let word = match block {
            Some(height) => call.block_id(BlockId::number(height)).await,
            None => call.await,
        }
        .map_err(map_transport_error)?;

        Ok(word.into())
    }

    async fn read_code(&self, address: Address) -> Result<Vec<u8>, Error> {
        Ok(self.provider.get_code_at(address).await.map_err(map_transport_error)?.to_vec())
    }

    async fn block_height(&self) -> Result<u64, Error> {
        self.provider.get_block_number().await.map_err(map_transport_error)
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        self.provider.get_chain_id().await.map_err(map_transport_error)
    }
}

/// Split upstream failures into "node rejected the request" and "node
/// unreachable", so the two surface as different errors.
fn map_transport_error(e: TransportError) -> Error {
    match e {
        RpcError::ErrorResp(payload) => Error::RpcError(payload.to_string()),
        RpcError::NullResp => Error::RpcError("node returned a null response".to_string()),
        e => Error::TransportError(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[tokio::test]
    async fn test_connect_rejects_empty_url() {
        let client = NodeClient::connect("").await;
        assert!(matches!(client, Err(Error::TransportError(_))));
    }

    #[tokio::test]
    async fn test_read_code() {
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| {
            println!("RPC_URL not set, skipping test");
            std::process::exit(0);
        });

        let client = NodeClient::connect(&rpc_url).await.expect("failed to connect");

        // WETH9 has deployed code on mainnet
        let code = client
            .read_code(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"))
            .await
            .expect("failed to fetch code");
        assert!(!code.is_empty());
    }

    #[tokio::test]
    async fn test_block_height() {
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| {
            println!("RPC_URL not set, skipping test");
            std::process::exit(0);
        });

        let client = NodeClient::connect(&rpc_url).await.expect("failed to connect");
        let height = client.block_height().await.expect("failed to fetch block height");
        assert!(height > 0);
    }
}
