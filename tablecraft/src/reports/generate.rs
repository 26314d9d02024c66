//! Generate command report data structures.

use std::path::{Path, PathBuf};

use tablecraft_codegen::{GenerateReport, PreviewFile};
use tablecraft_config::ConfigurationError;
use tablecraft_core::WriteResult;

use super::output::{Output, Report};

/// Report data from a generate command.
#[derive(Debug)]
pub struct GenerateSummary {
    /// Base directory files were written under.
    pub output_dir: PathBuf,

    /// Fixed success message for the command.
    pub message: &'static str,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(GenerateReport),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
    /// Configuration problems found while planning.
    pub warnings: Vec<ConfigurationError>,
}

impl Report for GenerateSummary {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(report) => self.render_written(out, report),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateSummary {
    fn render_written(&self, out: &mut dyn Output, report: &GenerateReport) {
        for warning in &report.warnings {
            out.warning(&warning.to_string());
        }

        if !report.ignored_tables.is_empty() {
            out.key_value("Ignored tables", &report.ignored_tables.join(", "));
        }

        out.newline();
        for file in &report.files {
            let path = self.relative(&file.path);
            match file.result {
                WriteResult::Created => out.added_item(&path),
                WriteResult::Skipped => out.unchanged_item(&format!("{} (exists)", path)),
            }
        }
        out.newline();
        out.key_value("Created", &report.created().to_string());
        out.key_value("Skipped", &report.skipped().to_string());

        if let Some(provider) = &report.provider {
            out.newline();
            out.section("Register the Blueprint macro provider in bootstrap/providers.php");
            out.list_item(&format!("{}::class", provider));
        }

        out.newline();
        out.preformatted(self.message);
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for warning in &preview.warnings {
            out.warning(&warning.to_string());
        }

        for file in &preview.files {
            out.divider(&file.path.display().to_string());
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.output_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use tablecraft_codegen::{FileKind, FileOutcome};

    use super::*;
    use crate::reports::BufferOutput;

    fn summary(result: GenerationResult) -> GenerateSummary {
        GenerateSummary {
            output_dir: PathBuf::from("app"),
            message: "Migrations generated successfully.",
            result,
        }
    }

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            files: vec![
                FileOutcome {
                    kind: FileKind::Migration,
                    path: PathBuf::from("app/database/migrations/0001_create_users_table.php"),
                    result: WriteResult::Created,
                },
                FileOutcome {
                    kind: FileKind::BlueprintMacro,
                    path: PathBuf::from("app/app/Providers/BlueprintMacroServiceProvider.php"),
                    result: WriteResult::Skipped,
                },
            ],
            ignored_tables: vec!["migrations".to_string(), "jobs".to_string()],
            warnings: vec![ConfigurationError::new(
                "global.common_fields[0]",
                "missing type",
            )],
            provider: Some("App\\Providers\\BlueprintMacroServiceProvider".to_string()),
        };
        let mut out = BufferOutput::default();
        summary(GenerationResult::Written(report)).render(&mut out);

        insta::assert_snapshot!(out.text(), @r"
        warning: global.common_fields[0]: missing type
        Ignored tables: migrations, jobs

          + database/migrations/0001_create_users_table.php
          = app/Providers/BlueprintMacroServiceProvider.php (exists)

        Created: 1
        Skipped: 1

        Register the Blueprint macro provider in bootstrap/providers.php:
          - App\Providers\BlueprintMacroServiceProvider::class

        Migrations generated successfully.
        ");
    }

    #[test]
    fn test_render_preview() {
        let preview = PreviewResult {
            files: vec![PreviewFile {
                kind: FileKind::Model,
                path: PathBuf::from("app/Models/User.php"),
                content: "<?php".to_string(),
            }],
            warnings: Vec::new(),
        };
        let mut out = BufferOutput::default();
        summary(GenerationResult::Preview(preview)).render(&mut out);

        insta::assert_snapshot!(out.text(), @r"
        ── app/Models/User.php ──
        <?php
        ── Summary ──
        1 files would be generated
        ");
    }
}
