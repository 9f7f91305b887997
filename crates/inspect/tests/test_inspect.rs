//! Integration tests for the storage analysis pipeline.

#[cfg(test)]
mod integration_tests {
    use std::collections::HashMap;

    use alloy::primitives::{address, Address, B256, U256};
    use async_trait::async_trait;
    use slotlens_common::{error::Error as CommonError, ether::provider::ChainClient};
    use slotlens_inspect::{inspect_with_client, InspectArgsBuilder};

    const TARGET: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    /// In-memory chain state keyed per address, so proxy and implementation
    /// storage can differ.
    struct MockChain {
        code: Vec<u8>,
        words: HashMap<(Address, B256), B256>,
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn read_word(
            &self,
            address: Address,
            slot: B256,
            _block: Option<u64>,
        ) -> Result<B256, CommonError> {
            Ok(self.words.get(&(address, slot)).copied().unwrap_or(B256::ZERO))
        }

        async fn read_code(&self, _address: Address) -> Result<Vec<u8>, CommonError> {
            Ok(self.code.clone())
        }

        async fn block_height(&self) -> Result<u64, CommonError> {
            Ok(1)
        }

        async fn chain_id(&self) -> Result<u64, CommonError> {
            Ok(1)
        }
    }

    fn slot_key(index: u64) -> B256 {
        B256::from(U256::from(index))
    }

    #[tokio::test]
    async fn test_inspect_layout_driven_owner() {
        let target: Address = TARGET.parse().expect("invalid target");
        let owner = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");

        let mut words = HashMap::new();
        words.insert((target, slot_key(0)), owner.into_word());
        let chain = MockChain { code: vec![0x60, 0x80], words };

        let layout = r#"{
            "storage": [
                { "label": "owner", "type": "t_address", "slot": "0", "offset": 0 }
            ]
        }"#;
        let args = InspectArgsBuilder::new()
            .target(TARGET.to_string())
            .storage_layout(Some(layout.to_string()))
            .max_slots(4)
            .build()
            .expect("failed to build args");

        let result = inspect_with_client(args, &chain).await.expect("failed to inspect");

        assert_eq!(result.address, TARGET);
        assert_eq!(result.variable_view.len(), 1);
        assert_eq!(result.variable_view[0].name, "owner");
        assert_eq!(result.variable_view[0].type_name, "address");
        assert_eq!(
            result.variable_view[0].value,
            Some("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984".to_string())
        );
        assert_eq!(result.variable_view[0].slot, Some(0));
    }

    #[tokio::test]
    async fn test_inspect_heuristic_bool_slot() {
        let target: Address = TARGET.parse().expect("invalid target");

        let mut bool_word = [0u8; 32];
        bool_word[31] = 1;
        let mut words = HashMap::new();
        words.insert((target, slot_key(5)), B256::from(bool_word));
        let chain = MockChain { code: vec![0x60, 0x80], words };

        let args = InspectArgsBuilder::new()
            .target(TARGET.to_string())
            .max_slots(8)
            .build()
            .expect("failed to build args");

        let result = inspect_with_client(args, &chain).await.expect("failed to inspect");

        assert_eq!(result.abi_source, None);
        assert_eq!(result.variable_view.len(), 1);
        assert_eq!(result.variable_view[0].name, "slot_5");
        assert_eq!(result.variable_view[0].type_name, "bool");
        assert_eq!(result.variable_view[0].value, Some("true".to_string()));
        assert_eq!(result.variable_view[0].slot, Some(5));
    }

    #[tokio::test]
    async fn test_inspect_rejects_accounts_without_code() {
        let chain = MockChain { code: Vec::new(), words: HashMap::new() };

        let args = InspectArgsBuilder::new()
            .target(TARGET.to_string())
            .max_slots(4)
            .build()
            .expect("failed to build args");

        let err = inspect_with_client(args, &chain)
            .await
            .expect_err("expected inspect to fail on an EOA");
        assert!(err.to_string().contains("externally owned account"));
    }

    #[tokio::test]
    async fn test_inspect_result_serializes() {
        let target: Address = TARGET.parse().expect("invalid target");

        let mut words = HashMap::new();
        words.insert((target, slot_key(0)), B256::from(U256::from(42u64)));
        let chain = MockChain { code: vec![0x60, 0x80], words };

        let args = InspectArgsBuilder::new()
            .target(TARGET.to_string())
            .max_slots(2)
            .build()
            .expect("failed to build args");

        let result = inspect_with_client(args, &chain).await.expect("failed to inspect");
        let json = serde_json::to_value(&result).expect("failed to serialize result");

        assert_eq!(json["address"], TARGET);
        assert_eq!(json["is_proxy"], false);
        assert_eq!(json["slot_view"][0]["type"], "uint256");
        assert_eq!(json["slot_view"][0]["value"], "42");
        assert_eq!(json["slot_view"][1]["type"], "unknown");
        assert!(json["slot_view"][1]["value"].is_null());
    }

    #[tokio::test]
    async fn test_inspect_live_weth() {
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| {
            println!("RPC_URL not set, skipping test");
            std::process::exit(0);
        });

        let args = InspectArgsBuilder::new()
            .target(TARGET.to_string())
            .rpc_url(rpc_url)
            .max_slots(8)
            .build()
            .expect("failed to build args");

        let result = slotlens_inspect::inspect(args).await.expect("failed to inspect");
        assert_eq!(result.slot_view.len(), 8);
    }
}
