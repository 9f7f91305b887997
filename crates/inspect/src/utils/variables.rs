//! Variable-view reconstruction strategies.
//!
//! Exactly one strategy runs per analysis, in strict priority order: an
//! explicit storage layout is authoritative, ABI hints are a best-effort
//! positional approximation, and the heuristic fallback surfaces whatever
//! the unhinted classifier can make of the raw words.
//!
//! All strategies are pure transformations over the already-crawled words,
//! indexed by slot: crawled storage always covers `0..words.len()`.

use alloy::primitives::B256;
use slotlens_common::ether::types::{decode_auto, decode_hinted};

use crate::{
    interfaces::VariableEntry,
    utils::{abi::StateVariableHint, layout::StorageLayoutEntry},
};

/// Decode each declared layout entry's crawled word by its declared type.
/// Entries whose slot lies beyond the crawled range are silently omitted.
pub(crate) fn from_layout(entries: &[StorageLayoutEntry], words: &[B256]) -> Vec<VariableEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            let word = words.get(entry.slot as usize)?;
            Some(VariableEntry {
                name: entry.label.clone(),
                type_name: entry.type_name.clone(),
                value: decode_hinted(&entry.type_name, word).map(|value| value.render()),
                slot: Some(entry.slot),
            })
        })
        .collect()
}

/// Align ABI hints to slots positionally: hint `i` is read from slot `i`.
/// ABI hints carry no slot authority, so this is an explicitly best-effort
/// approximation; hints beyond the crawled range are skipped.
pub(crate) fn from_abi_hints(hints: &[StateVariableHint], words: &[B256]) -> Vec<VariableEntry> {
    hints
        .iter()
        .enumerate()
        .filter_map(|(i, hint)| {
            let word = words.get(i)?;
            Some(VariableEntry {
                name: hint.name.clone(),
                type_name: hint.type_name.clone(),
                value: decode_hinted(&hint.type_name, word).map(|value| value.render()),
                slot: Some(i as u64),
            })
        })
        .collect()
}

/// Surface every slot the unhinted classifier can decode as a synthetic
/// `slot_<index>` variable. Zero words classify as unknown and are dropped.
pub(crate) fn from_heuristics(words: &[B256]) -> Vec<VariableEntry> {
    words
        .iter()
        .enumerate()
        .filter_map(|(i, word)| {
            let decoded = decode_auto(word);
            decoded.value.map(|value| VariableEntry {
                name: format!("slot_{i}"),
                type_name: decoded.type_name,
                value: Some(value.render()),
                slot: Some(i as u64),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    fn word_of_address() -> B256 {
        address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984").into_word()
    }

    fn word_of_uint(value: u64) -> B256 {
        B256::from(U256::from(value))
    }

    #[test]
    fn test_layout_decodes_declared_types() {
        let entries = vec![
            StorageLayoutEntry {
                label: "owner".to_string(),
                type_name: "address".to_string(),
                slot: 0,
                offset: 0,
            },
            StorageLayoutEntry {
                label: "totalSupply".to_string(),
                type_name: "uint256".to_string(),
                slot: 1,
                offset: 0,
            },
        ];
        let words = vec![word_of_address(), word_of_uint(1000)];

        let variables = from_layout(&entries, &words);
        assert_eq!(
            variables,
            vec![
                VariableEntry {
                    name: "owner".to_string(),
                    type_name: "address".to_string(),
                    value: Some("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984".to_string()),
                    slot: Some(0),
                },
                VariableEntry {
                    name: "totalSupply".to_string(),
                    type_name: "uint256".to_string(),
                    value: Some("1000".to_string()),
                    slot: Some(1),
                },
            ]
        );
    }

    #[test]
    fn test_layout_omits_entries_beyond_the_crawl() {
        let entries = vec![StorageLayoutEntry {
            label: "distant".to_string(),
            type_name: "uint256".to_string(),
            slot: 900,
            offset: 0,
        }];
        let words = vec![word_of_uint(1); 4];

        assert!(from_layout(&entries, &words).is_empty());
    }

    #[test]
    fn test_layout_reports_unset_slots_as_null() {
        let entries = vec![StorageLayoutEntry {
            label: "paused".to_string(),
            type_name: "bool".to_string(),
            slot: 0,
            offset: 0,
        }];
        let words = vec![B256::ZERO];

        let variables = from_layout(&entries, &words);
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].value, None);
    }

    #[test]
    fn test_abi_hints_align_positionally() {
        let hints = vec![
            StateVariableHint { name: "owner".to_string(), type_name: "address".to_string() },
            StateVariableHint { name: "supply".to_string(), type_name: "uint256".to_string() },
            StateVariableHint { name: "beyond".to_string(), type_name: "uint256".to_string() },
        ];
        let words = vec![word_of_address(), word_of_uint(42)];

        let variables = from_abi_hints(&hints, &words);
        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].name, "owner");
        assert_eq!(variables[0].slot, Some(0));
        assert_eq!(variables[1].value, Some("42".to_string()));
        assert_eq!(variables[1].slot, Some(1));
    }

    #[test]
    fn test_heuristics_surface_only_decodable_slots() {
        let mut bool_word = [0u8; 32];
        bool_word[31] = 1;
        let words = vec![B256::ZERO, word_of_uint(77), B256::ZERO, B256::from(bool_word)];

        let variables = from_heuristics(&words);
        assert_eq!(
            variables,
            vec![
                VariableEntry {
                    name: "slot_1".to_string(),
                    type_name: "uint256".to_string(),
                    value: Some("77".to_string()),
                    slot: Some(1),
                },
                VariableEntry {
                    name: "slot_3".to_string(),
                    type_name: "bool".to_string(),
                    value: Some("true".to_string()),
                    slot: Some(3),
                },
            ]
        );
    }
}
