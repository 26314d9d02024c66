//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`Indent`] - Indentation unit
//! - [`MethodChain`], [`PhpValue`] - `$receiver->call(...)` statements
//! - [`PhpArray`] - Multi-line array literals

mod code_builder;
mod indent;
mod value;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use value::{MethodCall, MethodChain, PhpArray, PhpValue, quote};
