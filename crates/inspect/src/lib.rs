//! The Inspect module provides functionality to analyze the persistent
//! storage of a deployed contract.
//!
//! It crawls raw storage words from a node, detects EIP-1967 proxy
//! indirection, resolves an ABI when one is available, and reconstructs a
//! best-effort view of the contract's state variables from an explicit
//! storage layout, ABI hints, or value-shape heuristics.

/// Error types for the inspect module
pub mod error;

mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use core::{inspect, inspect_with_client, read_slots, read_slots_with_client};
pub use error::Error;
pub use interfaces::{
    AbiSource, ContractStorage, InspectArgs, InspectArgsBuilder, SlotReadout, SlotViewEntry,
    SlotsArgs, SlotsArgsBuilder, VariableEntry,
};
