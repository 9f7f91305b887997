/// Filesystem helpers for reading, writing, and deleting files.
pub mod file;
