//! Laravel source emitters for tablecraft.
//!
//! This crate turns reflected tables into PHP files:
//!
//! - [`builder`] - Indented text building and PHP literals
//! - [`SharedFieldPlan`] - Which columns collapse into shared Blueprint calls
//! - [`files`] - One [`GeneratedFile`](tablecraft_core::GeneratedFile) per emitted file
//! - [`Generator`] - Reflects the database and writes or previews the files

pub mod builder;
mod classify;
pub mod files;
mod generator;
mod naming;

pub use classify::{PlanItem, SharedFieldPlan, SharedGroup};
pub use generator::{
    FileKind, FileOutcome, GenerateReport, Generator, MigrationNaming, PreviewFile, Target,
};
pub use naming::{ClassNamer, class_basename, lcfirst};
