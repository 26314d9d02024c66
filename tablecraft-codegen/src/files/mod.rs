//! Emitted files, one [`GeneratedFile`](tablecraft_core::GeneratedFile) each.
//!
//! Every emitter is a pure function of its parameters: the same table and
//! configuration always render byte-identical text.

mod blueprint_macro;
mod controller;
mod foreign_keys;
mod migration;
mod model;

use std::path::Path;

pub use blueprint_macro::BlueprintMacroFile;
pub use controller::ControllerFile;
pub use foreign_keys::ForeignKeysMigrationFile;
pub use migration::MigrationFile;
pub use model::ModelFile;
use tablecraft_core::find_by_suffix;

use crate::builder::CodeBuilder;

/// Render an anonymous-class migration with the given `up` and `down` bodies.
fn migration_class<U, D>(up: U, down: D) -> String
where
    U: FnOnce(CodeBuilder) -> CodeBuilder,
    D: FnOnce(CodeBuilder) -> CodeBuilder,
{
    CodeBuilder::php()
        .line("<?php")
        .blank()
        .line("use Illuminate\\Database\\Migrations\\Migration;")
        .line("use Illuminate\\Database\\Schema\\Blueprint;")
        .line("use Illuminate\\Support\\Facades\\Schema;")
        .blank()
        .braced("return new class extends Migration", "};", |b| {
            b.docblock(&["Run the migrations."])
                .braced("public function up(): void", "}", up)
                .blank()
                .docblock(&["Reverse the migrations."])
                .braced("public function down(): void", "}", down)
        })
        .build()
}

/// Whether `dir` already holds a file ending in `suffix`.
///
/// Unreadable directories count as empty; the write itself reports the error.
fn has_suffix(dir: &Path, suffix: &str) -> bool {
    find_by_suffix(dir, suffix).ok().flatten().is_some()
}
