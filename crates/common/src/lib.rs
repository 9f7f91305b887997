//! Common utilities, constants, and resources used across the slotlens codebase.
//!
//! This crate provides shared functionality for the slotlens engine, including
//! the chain client, storage-slot plumbing, word decoding, and general utility
//! functions.

/// Constants used throughout the slotlens codebase.
pub mod constants;

/// Common error type for slotlens modules.
pub mod error;

/// Utilities for interacting with Ethereum: the chain client, batched storage
/// reads, proxy detection, word decoding, and explorer lookups.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
