//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod generate;
mod inspect;
mod output;

pub use generate::{GenerateSummary, GenerationResult, PreviewResult};
pub use inspect::{InspectFormat, InspectReport};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
