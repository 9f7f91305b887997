/// Hex formatting helpers for EVM types.
pub mod hex;

/// HTTP helpers with retry support.
pub mod http;

/// Filesystem IO helpers.
pub mod io;

/// Integer reinterpretation helpers.
pub mod strings;
