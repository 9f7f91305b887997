//! ABI source resolution and state-variable hint extraction.
//!
//! An ABI is taken from exactly one of three sources, in priority order: a
//! caller-supplied value, a block explorer lookup, or nothing. Since an ABI
//! does not enumerate state variables, hints are inferred from indexed event
//! parameters and single-output getter functions.

use alloy::primitives::Address;
use alloy_json_abi::JsonAbi;
use serde_json::Value;
use slotlens_common::ether::etherscan::fetch_abi;
use tracing::debug;

use crate::interfaces::AbiSource;

/// A best-effort {name, type} guess at a state variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StateVariableHint {
    /// The inferred display name.
    pub name: String,
    /// The solidity type carried by the ABI declaration.
    pub type_name: String,
}

/// Resolve an ABI for `target`, trying the caller-supplied value first and
/// the explorer second. Returns the parsed ABI together with the tag that
/// records where it came from, or `(None, None)` when no source produced one.
pub(crate) async fn resolve_abi(
    provided: Option<&Value>,
    target: Address,
    api_url: &str,
    api_key: &str,
) -> (Option<JsonAbi>, Option<AbiSource>) {
    if let Some(value) = provided {
        match validate_abi(value) {
            Some(abi) => return (Some(abi), Some(AbiSource::Provided)),
            None => debug!("provided abi failed validation, trying the explorer"),
        }
    }

    if let Some(raw) = fetch_abi(target, api_url, api_key).await {
        match serde_json::from_str::<JsonAbi>(&raw) {
            Ok(abi) => return (Some(abi), Some(AbiSource::Explorer)),
            Err(e) => debug!("explorer abi for {} failed to parse: {}", target, e),
        }
    }

    (None, None)
}

/// Structurally validate a caller-supplied ABI: it must be a JSON array with
/// at least one function, event, constructor, fallback or receive entry, and
/// it must parse as an ABI.
pub(crate) fn validate_abi(value: &Value) -> Option<JsonAbi> {
    let entries = value.as_array()?;
    let has_declarations = entries.iter().any(|entry| {
        matches!(
            entry.get("type").and_then(Value::as_str),
            Some("function" | "event" | "constructor" | "fallback" | "receive")
        )
    });
    if !has_declarations {
        return None;
    }

    serde_json::from_value(value.clone()).ok()
}

/// Extract best-effort state-variable hints from an ABI: one hint per
/// indexed event parameter (named `<Event>_<param>`), then one per function
/// with a single output (named after the function). Hints follow the parsed
/// ABI's name-sorted order, so extraction is deterministic.
pub(crate) fn extract_state_variable_hints(abi: &JsonAbi) -> Vec<StateVariableHint> {
    let mut hints = Vec::new();

    for event in abi.events() {
        for input in event.inputs.iter().filter(|input| input.indexed) {
            hints.push(StateVariableHint {
                name: format!("{}_{}", event.name, input.name),
                type_name: input.ty.clone(),
            });
        }
    }

    for function in abi.functions() {
        if function.outputs.len() == 1 {
            hints.push(StateVariableHint {
                name: function.name.clone(),
                type_name: function.outputs[0].ty.clone(),
            });
        }
    }

    hints
}
