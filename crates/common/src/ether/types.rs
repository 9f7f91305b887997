//! Storage word decoding and derived-slot arithmetic.
//!
//! Everything here is pure: functions over 32-byte words with no I/O. The
//! decoder renders values "at rest" (text or boolean), and the derivation
//! helpers reproduce Solidity's mapping/dynamic-array slot rules.

use alloy::{
    primitives::{keccak256, Address, B256, U256},
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};

use crate::utils::strings::sign_uint;

/// A decoded value at rest: either a boolean or rendered text. Serialized
/// untagged, so booleans stay booleans in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// A boolean slot value.
    Bool(bool),
    /// Decimal integers, checksummed addresses, verbatim hex, or UTF-8 text.
    Text(String),
}

impl DecodedValue {
    /// Render the value as display text.
    pub fn render(&self) -> String {
        match self {
            DecodedValue::Bool(b) => b.to_string(),
            DecodedValue::Text(s) => s.clone(),
        }
    }
}

/// The outcome of classifying a storage word without a type hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedWord {
    /// The inferred type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The decoded value, when one exists.
    pub value: Option<DecodedValue>,
}

impl DecodedWord {
    /// The "nothing could be inferred" result.
    pub fn unknown() -> Self {
        Self { type_name: "unknown".to_string(), value: None }
    }
}

/// A single entry in the unhinted classification chain.
struct Classifier {
    type_name: &'static str,
    matches: fn(&B256) -> bool,
    decode: fn(&B256) -> DecodedValue,
}

/// Unhinted classification precedence. Address and bool are more specific
/// shapes than the integer fallback, so they run first; reordering this
/// list changes what the same bytes classify as.
const CLASSIFIERS: &[Classifier] = &[
    Classifier { type_name: "address", matches: looks_like_address, decode: render_address },
    Classifier { type_name: "bool", matches: looks_like_bool, decode: render_bool },
    Classifier { type_name: "uint256", matches: always, decode: render_uint },
];

/// A word passes as an address when its effective byte length (ignoring
/// leading zero bytes) is 15..=20: the upper 12 bytes are zero and the low
/// bytes have address-like width rather than looking like a small integer.
fn looks_like_address(word: &B256) -> bool {
    let effective = 32 - word.iter().take_while(|b| **b == 0).count();
    (15..=20).contains(&effective)
}

/// All bytes except the lowest are zero, and the lowest is 0x00 or 0x01.
fn looks_like_bool(word: &B256) -> bool {
    word[..31].iter().all(|b| *b == 0) && word[31] <= 1
}

fn always(_word: &B256) -> bool {
    true
}

fn render_address(word: &B256) -> DecodedValue {
    DecodedValue::Text(Address::from_word(*word).to_string())
}

fn render_bool(word: &B256) -> DecodedValue {
    DecodedValue::Bool(word[31] != 0)
}

fn render_uint(word: &B256) -> DecodedValue {
    DecodedValue::Text(U256::from_be_bytes(word.0).to_string())
}

fn render_int(word: &B256) -> DecodedValue {
    DecodedValue::Text(sign_uint(U256::from_be_bytes(word.0)).to_string())
}

/// Classify a word with no type hint by walking the classifier chain in
/// order. The zero word is the distinguished "unset" value and never
/// evidence of a type.
pub fn decode_auto(word: &B256) -> DecodedWord {
    if word.is_zero() {
        return DecodedWord::unknown();
    }

    for classifier in CLASSIFIERS {
        if (classifier.matches)(word) {
            return DecodedWord {
                type_name: classifier.type_name.to_string(),
                value: Some((classifier.decode)(word)),
            };
        }
    }

    DecodedWord::unknown()
}

/// Decode a word by a declared or hinted type name.
///
/// A zero word decodes to `None` regardless of the hint, so callers cannot
/// mistake unset storage for a meaningful zero value. Unknown type names
/// also decode to `None`.
pub fn decode_hinted(type_name: &str, word: &B256) -> Option<DecodedValue> {
    if word.is_zero() {
        return None;
    }

    let type_name = type_name.trim();

    if type_name == "address" {
        return Some(render_address(word));
    }

    if type_name == "bool" {
        return Some(render_bool(word));
    }

    if type_name == "string" {
        return decode_short_string(word);
    }

    if let Some(width) = type_name.strip_prefix("uint") {
        if width.chars().all(|c| c.is_ascii_digit()) {
            return Some(render_uint(word));
        }
        return None;
    }

    if let Some(width) = type_name.strip_prefix("int") {
        if width.chars().all(|c| c.is_ascii_digit()) {
            return Some(render_int(word));
        }
        return None;
    }

    if let Some(width) = type_name.strip_prefix("bytes") {
        if width.chars().all(|c| c.is_ascii_digit()) {
            // verbatim full-width hex, for both bytesN and dynamic bytes
            return Some(DecodedValue::Text(word.to_string()));
        }
        return None;
    }

    None
}

/// Best-effort single-word string decode. Bytes are truncated at the first
/// embedded zero; a word that begins with a zero byte is instead treated as
/// left-padded and has all zero bytes stripped. Long-form Solidity strings
/// spill past one word and are not reconstructed here.
fn decode_short_string(word: &B256) -> Option<DecodedValue> {
    let bytes: Vec<u8> = if word[0] == 0 {
        word.iter().copied().filter(|b| *b != 0).collect()
    } else {
        word.iter().copied().take_while(|b| *b != 0).collect()
    };

    if bytes.is_empty() {
        return None;
    }

    match String::from_utf8(bytes) {
        Ok(text) => Some(DecodedValue::Text(text)),
        Err(_) => None,
    }
}

/// Storage slot of `mapping[key]` for a mapping declared at `base_slot`.
///
/// Computes `keccak256(pack(key, base_slot))`, where the packed encoding is
/// `(address, uint256)` when `key_type` is `address` (20 + 32 bytes) and
/// `(bytes32, uint256)` otherwise (32 + 32 bytes). The same key bytes under
/// a different key type therefore derive a different slot.
pub fn derive_mapping_slot(base_slot: U256, key: B256, key_type: &str) -> B256 {
    let packed = if key_type == "address" {
        (Address::from_word(key), base_slot).abi_encode_packed()
    } else {
        (key, base_slot).abi_encode_packed()
    };

    keccak256(packed)
}

/// Storage slot of element `index` of a dynamic array declared at
/// `base_slot`: `keccak256(abi.encode(base_slot)) + index`, with wrapping
/// 256-bit addition. Elements are laid out sequentially from the hash.
pub fn derive_array_slot(base_slot: U256, index: u64) -> B256 {
    let base = U256::from_be_bytes(keccak256(base_slot.abi_encode()).0);
    B256::from(base.wrapping_add(U256::from(index)))
}
