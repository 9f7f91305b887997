use std::time::Instant;

use alloy::primitives::{Address, B256, U256};
use eyre::eyre;
use serde_json::Value;
use tracing::{debug, info};

use slotlens_common::{
    constants::{DEFAULT_CRAWL_SLOTS, MAX_CRAWL_SLOTS, MAX_SLOT_LIST},
    error::Error as CommonError,
    ether::{
        provider::{ChainClient, NodeClient},
        proxy::detect_proxy,
        slots::{crawl, read_words},
        types::decode_auto,
    },
    utils::{hex::ToLowerHex, io::file::read_file},
};

use crate::{
    error::Error,
    interfaces::{ContractStorage, InspectArgs, SlotReadout, SlotViewEntry, SlotsArgs},
    utils::{
        abi::{extract_state_variable_hints, resolve_abi},
        layout::parse_storage_layout,
        variables,
    },
};

/// Analyzes the storage of the target contract
///
/// This function connects a [`NodeClient`] from the configured RPC URL and
/// runs the full analysis pipeline: existence check, proxy detection, ABI
/// resolution, bulk slot crawl, and variable reconstruction.
///
/// # Arguments
///
/// * `args` - Configuration parameters for the inspect operation
///
/// # Returns
///
/// The assembled [`ContractStorage`], containing the raw slot view and the
/// reconstructed variable view
pub async fn inspect(args: InspectArgs) -> Result<ContractStorage, Error> {
    let client = NodeClient::connect(&args.rpc_url).await?;
    inspect_with_client(args, &client).await
}

/// Analyzes the storage of the target contract over the given [`ChainClient`].
///
/// This is the injectable core of [`inspect`]; tests and embedders may pass
/// their own client implementation.
pub async fn inspect_with_client(
    args: InspectArgs,
    client: &dyn ChainClient,
) -> Result<ContractStorage, Error> {
    let start_time = Instant::now();
    let address = parse_target(&args.target)?;

    let max_slots = match args.max_slots {
        0 => DEFAULT_CRAWL_SLOTS,
        n if n > MAX_CRAWL_SLOTS => {
            return Err(Error::Eyre(eyre!(
                "max_slots {n} exceeds the limit of {MAX_CRAWL_SLOTS}"
            )))
        }
        n => n,
    };

    // the target must actually hold code. an unreachable node is reported
    // differently than a codeless target so the caller can tell a bad target
    // from broken infrastructure.
    match client.is_contract(address).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(Error::NoCode(format!(
                "{address} holds no contract code. it is an externally owned account, not a contract"
            )))
        }
        Err(CommonError::TransportError(e)) => {
            return Err(Error::Transport(format!(
                "unable to reach the rpc node, check your network connection and rpc url: {e}"
            )))
        }
        Err(e) => return Err(Error::Rpc(e.to_string())),
    }

    // proxy detection is advisory. when an implementation is found it becomes
    // the target for ABI and variable reconstruction, while raw slot reads
    // stay on the original address, where the storage actually lives.
    let proxy_info = detect_proxy(client, address).await;
    let logic_address = proxy_info.implementation.unwrap_or(address);
    if proxy_info.is_proxy {
        info!("{} delegates to implementation {}", address, logic_address);
    }

    let provided_abi = match &args.abi {
        Some(raw) => Some(load_json_argument(raw)?),
        None => None,
    };
    let (abi, abi_source) = resolve_abi(
        provided_abi.as_ref(),
        logic_address,
        &args.explorer_api_url,
        &args.explorer_api_key,
    )
    .await;

    // bulk crawl. always populates the raw slot view, regardless of whether
    // any type information was resolved.
    let word_map = crawl(client, address, max_slots, args.block, args.batch_size).await;
    let words: Vec<B256> = (0..max_slots as u64)
        .map(|i| word_map.get(&B256::from(U256::from(i))).copied().unwrap_or(B256::ZERO))
        .collect();

    let slot_view: Vec<SlotViewEntry> = words
        .iter()
        .enumerate()
        .map(|(i, word)| SlotViewEntry {
            slot: i as u64,
            raw: word.to_lower_hex(),
            decoded: decode_auto(word),
        })
        .collect();

    let layout = match &args.storage_layout {
        Some(raw) => {
            let value = load_json_argument(raw)?;
            let parsed = parse_storage_layout(&value);
            if parsed.is_none() {
                debug!("supplied storage layout has no recognizable entries, ignoring it");
            }
            parsed
        }
        None => None,
    };

    // exactly one reconstruction strategy runs, in strict priority order
    let variable_view = if let Some(entries) = layout {
        debug!("reconstructing variables from the supplied storage layout");
        variables::from_layout(&entries, &words)
    } else if let Some(abi) = &abi {
        debug!("reconstructing variables from abi hints");
        variables::from_abi_hints(&extract_state_variable_hints(abi), &words)
    } else {
        debug!("no layout or abi available, reconstructing variables heuristically");
        variables::from_heuristics(&words)
    };

    debug!("storage analysis took {:?}", start_time.elapsed());

    Ok(ContractStorage {
        address: address.to_string(),
        is_proxy: proxy_info.is_proxy,
        implementation_address: proxy_info.implementation.map(|a| a.to_string()),
        slot_view,
        variable_view,
        abi_source,
    })
}

/// Reads an explicit list of storage slots from the target contract
///
/// This function connects a [`NodeClient`] from the configured RPC URL and
/// fetches exactly the requested slots. No existence check and no proxy or
/// ABI stages run; this is raw visibility into chosen slots.
///
/// # Arguments
///
/// * `args` - Configuration parameters for the slots operation
///
/// # Returns
///
/// A [`SlotReadout`] with one auto-decoded entry per requested slot, in
/// request order
pub async fn read_slots(args: SlotsArgs) -> Result<SlotReadout, Error> {
    let client = NodeClient::connect(&args.rpc_url).await?;
    read_slots_with_client(args, &client).await
}

/// Reads an explicit list of storage slots over the given [`ChainClient`].
pub async fn read_slots_with_client(
    args: SlotsArgs,
    client: &dyn ChainClient,
) -> Result<SlotReadout, Error> {
    let address = parse_target(&args.target)?;

    if args.slots.is_empty() {
        return Err(Error::Eyre(eyre!("no slots requested")));
    }
    if args.slots.len() > MAX_SLOT_LIST {
        return Err(Error::Eyre(eyre!(
            "too many slots requested: {} (the limit is {MAX_SLOT_LIST})",
            args.slots.len()
        )));
    }

    let keys: Vec<B256> = args.slots.iter().map(|i| B256::from(U256::from(*i))).collect();
    let word_map = read_words(client, address, &keys, args.block, args.batch_size).await;

    let slots = args
        .slots
        .iter()
        .zip(keys.iter())
        .map(|(slot, key)| {
            let word = word_map.get(key).copied().unwrap_or(B256::ZERO);
            SlotViewEntry { slot: *slot, raw: word.to_lower_hex(), decoded: decode_auto(&word) }
        })
        .collect();

    Ok(SlotReadout { address: address.to_string(), slots })
}

fn parse_target(target: &str) -> Result<Address, Error> {
    target.parse::<Address>().map_err(|_| Error::InvalidTarget(target.to_string()))
}

/// Loads an ABI or storage-layout argument, which may be inline JSON or the
/// path to a JSON file.
fn load_json_argument(raw: &str) -> Result<Value, Error> {
    let trimmed = raw.trim();
    let body = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        read_file(trimmed).map_err(|e| eyre!("unable to read {trimmed}: {e}"))?
    };

    serde_json::from_str(&body).map_err(|e| Error::Eyre(eyre!("invalid json argument: {e}")))
}
