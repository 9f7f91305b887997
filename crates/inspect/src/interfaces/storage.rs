use serde::{Deserialize, Serialize};
use slotlens_common::ether::types::DecodedWord;

/// Records which source supplied the ABI used for variable reconstruction,
/// surfaced to the caller for transparency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AbiSource {
    /// The caller supplied the ABI directly.
    Provided,
    /// The ABI was fetched from a block explorer.
    Explorer,
    /// Reserved for ABIs loaded from local artifacts; recognized but never
    /// produced by this engine.
    Local,
}

/// A single storage slot with its raw word and best-effort decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotViewEntry {
    /// The slot index.
    pub slot: u64,

    /// The raw 32-byte word, full-width hex.
    pub raw: String,

    /// The inferred type and decoded value of the word.
    #[serde(flatten)]
    pub decoded: DecodedWord,
}

/// A reconstructed state variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableEntry {
    /// The declared or synthesized display name.
    pub name: String,

    /// The declared or inferred solidity type.
    #[serde(rename = "type")]
    pub type_name: String,

    /// The decoded value formatted as text, or None when the slot is unset.
    pub value: Option<String>,

    /// The slot index the value was read from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u64>,
}

/// The assembled result of a storage analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractStorage {
    /// The analyzed address, checksummed.
    pub address: String,

    /// Whether the address was recognized as an EIP-1967 proxy.
    pub is_proxy: bool,

    /// The implementation address the proxy delegates to, checksummed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_address: Option<String>,

    /// The raw slot-by-slot view of the crawled storage.
    pub slot_view: Vec<SlotViewEntry>,

    /// The best-effort reconstructed variable view.
    pub variable_view: Vec<VariableEntry>,

    /// Which source supplied the ABI, or None when no ABI was available.
    pub abi_source: Option<AbiSource>,
}

/// The slot view for an explicitly requested list of slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotReadout {
    /// The address the slots were read from, checksummed.
    pub address: String,

    /// One entry per requested slot, in request order.
    pub slots: Vec<SlotViewEntry>,
}
