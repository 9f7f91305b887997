//! Parsing of solc storage layouts.
//!
//! Accepts the layout in any of the shapes it commonly travels in: the full
//! compiler output (`{"storageLayout": {"storage": [...]}}`), the layout
//! object itself (`{"storage": [...]}`), or the bare entry array. Type
//! identifiers are canonicalized from solc's internal form (`t_uint256`,
//! `t_string_storage`) to plain solidity type names.

use serde_json::Value;
use tracing::debug;

/// A single declared variable in a storage layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StorageLayoutEntry {
    /// The declared variable name.
    pub label: String,
    /// The canonicalized solidity type.
    pub type_name: String,
    /// The slot index the variable starts at.
    pub slot: u64,
    /// The byte offset within the slot.
    pub offset: u64,
}

/// Parse a storage layout out of `value`, returning None when it carries no
/// recognizable layout.
pub(crate) fn parse_storage_layout(value: &Value) -> Option<Vec<StorageLayoutEntry>> {
    let storage = match value {
        Value::Array(entries) => entries,
        Value::Object(fields) => {
            let layout = match fields.get("storageLayout") {
                Some(inner) => inner,
                None => value,
            };
            layout.get("storage")?.as_array()?
        }
        _ => return None,
    };

    let mut parsed = Vec::with_capacity(storage.len());
    for entry in storage {
        let Some(label) = entry.get("label").and_then(Value::as_str) else {
            debug!("skipping layout entry without a label: {}", entry);
            continue;
        };
        let Some(type_name) = entry.get("type").and_then(Value::as_str) else {
            debug!("skipping layout entry without a type: {}", entry);
            continue;
        };
        // solc emits slot indices as strings, older tooling as numbers
        let Some(slot) = parse_slot_index(entry.get("slot")) else {
            debug!("skipping layout entry without a slot: {}", entry);
            continue;
        };
        let offset = entry.get("offset").and_then(Value::as_u64).unwrap_or(0);

        parsed.push(StorageLayoutEntry {
            label: label.to_string(),
            type_name: canonicalize_type(type_name),
            slot,
            offset,
        });
    }

    if parsed.is_empty() {
        return None;
    }

    Some(parsed)
}

fn parse_slot_index(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    }
}

/// Strip solc's internal type-identifier decorations, e.g. `t_uint256` to
/// `uint256` and `t_string_storage` to `string`.
fn canonicalize_type(raw: &str) -> String {
    let stripped = raw.strip_prefix("t_").unwrap_or(raw);
    let stripped = stripped.strip_suffix("_ptr").unwrap_or(stripped);
    let stripped = stripped.strip_suffix("_storage").unwrap_or(stripped);
    stripped.to_string()
}
