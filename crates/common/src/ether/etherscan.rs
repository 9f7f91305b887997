//! Fetch verified contract ABIs from a block-explorer API.

use alloy::primitives::Address;
use eyre::{bail, eyre, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotlens_cache::with_cache;
use tracing::debug;

use crate::utils::{hex::ToLowerHex, http::get_json_from_url};

/// Response envelope returned by explorer `getabi` lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerAbiResponse {
    /// "1" on success, "0" otherwise.
    pub status: String,
    /// The ABI payload. Either raw JSON or a JSON-encoded string.
    pub result: Option<Value>,
}

/// Fetch the verified ABI for `address` from the configured explorer,
/// returning the ABI as a JSON string. Successful lookups are cached.
///
/// Explorer lookups are strictly best-effort: network failures, missing
/// verification, and unparseable bodies all degrade to `None`.
pub async fn fetch_abi(address: Address, api_url: &str, api_key: &str) -> Option<String> {
    if api_url.is_empty() {
        debug!("no explorer API URL configured, skipping ABI lookup");
        return None;
    }

    match with_cache(&format!("abi:{}", address.to_lower_hex()), || async {
        fetch_abi_from_explorer(address, api_url, api_key).await
    })
    .await
    {
        Ok(abi) => Some(abi),
        Err(e) => {
            debug!("explorer ABI lookup for {} failed: {}", address, e);
            None
        }
    }
}

/// Query `GET <api_url>?module=contract&action=getabi&address=<addr>` and
/// unwrap the envelope.
async fn fetch_abi_from_explorer(
    address: Address,
    api_url: &str,
    api_key: &str,
) -> Result<String> {
    let mut url =
        format!("{}?module=contract&action=getabi&address={}", api_url, address.to_lower_hex());
    if !api_key.is_empty() {
        url.push_str(&format!("&apikey={api_key}"));
    }

    let response = get_json_from_url(&url, 10)
        .await
        .map_err(|e| eyre!("explorer request failed: {e}"))?
        .ok_or_else(|| eyre!("no parseable response from explorer"))?;

    let envelope: ExplorerAbiResponse = serde_json::from_value(response)
        .map_err(|e| eyre!("unexpected explorer response shape: {e}"))?;

    if envelope.status != "1" {
        bail!("explorer returned status {}", envelope.status);
    }

    parse_abi_payload(envelope.result.ok_or_else(|| eyre!("explorer response missing result"))?)
}

/// Unwrap a `getabi` payload, which may arrive either as raw JSON or
/// double-encoded as a JSON string.
fn parse_abi_payload(result: Value) -> Result<String> {
    match result {
        Value::String(text) => {
            let inner: Value =
                serde_json::from_str(&text).map_err(|_| eyre!("explorer result is not JSON"))?;
            if !inner.is_array() {
                bail!("explorer result is not an ABI array");
            }
            Ok(text)
        }
        value @ Value::Array(_) => Ok(value.to_string()),
        _ => bail!("unrecognized ABI payload shape"),
    }
}
