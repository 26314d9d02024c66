//! Core operations.
//!
//! This module contains the business logic for tablecraft commands,
//! separated from CLI argument parsing and output rendering.

pub mod generate;
pub mod inspect;

pub use generate::{GenerateOptions, describe, generate};
pub use inspect::inspect;
