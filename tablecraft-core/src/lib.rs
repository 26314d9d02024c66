//! Core utilities and types for tablecraft.
//!
//! This crate provides the file writer and the naming helpers shared by
//! the rest of the workspace.

mod file;
mod naming;

// File operations
pub use file::{
    File, GeneratedFile, WriteResult, ensure_directory, find_by_suffix, write_if_absent,
};
// String utilities
pub use naming::{capitalize, singularize, to_camel_case, to_pascal_case};
