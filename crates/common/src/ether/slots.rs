//! Batched retrieval of contract storage slots.
//!
//! Slots are fetched in fixed-size groups with a full join per group and a
//! short pause between groups, capping concurrent load on the upstream node.
//! A single slot's failure never fails the batch; the slot is reported with
//! the zero word instead, so one inaccessible slot cannot block visibility
//! into the rest.

use std::time::{Duration, Instant};

use alloy::primitives::{Address, B256, U256};
use futures::future::join_all;
use hashbrown::HashMap;
use tracing::debug;

use crate::{
    constants::{BATCH_PAUSE_MS, DEFAULT_BATCH_SIZE},
    ether::provider::ChainClient,
};

/// Fetch the given storage slots of `address`, optionally pinned to a block
/// height. The result always contains one entry per requested slot, with
/// unreachable slots defaulting to the zero word.
pub async fn read_words(
    client: &dyn ChainClient,
    address: Address,
    slots: &[B256],
    block: Option<u64>,
    batch_size: usize,
) -> HashMap<B256, B256> {
    let start_time = Instant::now();
    let batch_size = if batch_size == 0 { DEFAULT_BATCH_SIZE } else { batch_size };
    let mut words = HashMap::with_capacity(slots.len());

    for (i, group) in slots.chunks(batch_size).enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(BATCH_PAUSE_MS)).await;
        }

        let fetches = group.iter().copied().map(|slot| async move {
            match client.read_word(address, slot, block).await {
                Ok(word) => (slot, word),
                Err(e) => {
                    debug!("slot {} of {} unavailable, defaulting to zero: {}", slot, address, e);
                    (slot, B256::ZERO)
                }
            }
        });

        words.extend(join_all(fetches).await);
    }

    debug!("fetched {} storage slots in {:?}", words.len(), start_time.elapsed());

    words
}

/// Fetch slots `0..max_slots` of `address` through [`read_words`].
pub async fn crawl(
    client: &dyn ChainClient,
    address: Address,
    max_slots: usize,
    block: Option<u64>,
    batch_size: usize,
) -> HashMap<B256, B256> {
    let slots: Vec<B256> =
        (0..max_slots as u64).map(|i| B256::from(U256::from(i))).collect();

    read_words(client, address, &slots, block, batch_size).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use alloy::primitives::{address, b256};
    use async_trait::async_trait;
    use hashbrown::HashSet;

    /// In-memory chain state with a configurable set of failing slots.
    struct MockChain {
        words: HashMap<B256, B256>,
        failing: HashSet<B256>,
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn read_word(
            &self,
            _address: Address,
            slot: B256,
            _block: Option<u64>,
        ) -> Result<B256, Error> {
            if self.failing.contains(&slot) {
                return Err(Error::RpcError("slot unavailable".to_string()));
            }
            Ok(self.words.get(&slot).copied().unwrap_or(B256::ZERO))
        }

        async fn read_code(&self, _address: Address) -> Result<Vec<u8>, Error> {
            Ok(vec![])
        }

        async fn block_height(&self) -> Result<u64, Error> {
            Ok(1)
        }

        async fn chain_id(&self) -> Result<u64, Error> {
            Ok(1)
        }
    }

    fn slot(i: u64) -> B256 {
        B256::from(U256::from(i))
    }

    #[tokio::test]
    async fn test_read_words_returns_entry_for_every_slot() {
        let mut words = HashMap::new();
        words.insert(
            slot(1),
            b256!("00000000000000000000000000000000000000000000000000000000000000ff"),
        );

        let mut failing = HashSet::new();
        failing.insert(slot(4));

        let chain = MockChain { words, failing };
        let target = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");

        let requested: Vec<B256> = (0..7).map(slot).collect();
        let result = read_words(&chain, target, &requested, None, 3).await;

        assert_eq!(result.len(), requested.len());
        assert_eq!(
            result.get(&slot(1)),
            Some(&b256!("00000000000000000000000000000000000000000000000000000000000000ff"))
        );
        // the failing slot is reported as the zero word, not an error
        assert_eq!(result.get(&slot(4)), Some(&B256::ZERO));
    }

    #[tokio::test]
    async fn test_crawl_requests_sequential_slots() {
        let mut words = HashMap::new();
        for i in 0..3u64 {
            words.insert(slot(i), B256::from(U256::from(i + 100)));
        }

        let chain = MockChain { words, failing: HashSet::new() };
        let target = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");

        let result = crawl(&chain, target, 3, None, 50).await;

        assert_eq!(result.len(), 3);
        for i in 0..3u64 {
            assert_eq!(result.get(&slot(i)), Some(&B256::from(U256::from(i + 100))));
        }
    }

    #[tokio::test]
    async fn test_read_words_zero_batch_size_falls_back_to_default() {
        let chain = MockChain { words: HashMap::new(), failing: HashSet::new() };
        let target = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");

        let requested: Vec<B256> = (0..4).map(slot).collect();
        let result = read_words(&chain, target, &requested, None, 0).await;

        assert_eq!(result.len(), 4);
    }
}
