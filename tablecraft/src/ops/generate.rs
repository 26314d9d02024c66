//! Generate operation - reflection followed by file emission.

use std::path::Path;

use eyre::Result;
use tablecraft_codegen::{Generator, Target};
use tablecraft_config::Config;

use crate::reports::{GenerateSummary, GenerationResult, PreviewResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Base directory the configured output directories are relative to.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Success message printed after writing.
    pub message: &'static str,
}

/// Execute the generate operation.
///
/// Connects to the configured database, reflects it once and emits the
/// files for `targets`.
pub fn generate(
    config: &Config,
    targets: &[Target],
    opts: GenerateOptions,
) -> Result<GenerateSummary> {
    tracing::debug!(
        targets = %describe(targets),
        dry_run = opts.dry_run,
        output = %opts.output_dir.display(),
        "starting generation"
    );
    let reflector = tablecraft_schema::connect(&config.database)?;
    let generator = Generator::new(config, reflector.as_ref());

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: generator.preview(targets)?,
            warnings: config.global.common_fields().errors,
        })
    } else {
        GenerationResult::Written(generator.generate(targets, opts.output_dir)?)
    };

    Ok(GenerateSummary {
        output_dir: opts.output_dir.to_path_buf(),
        message: opts.message,
        result,
    })
}

/// Human readable name of a target list, for status lines.
pub fn describe(targets: &[Target]) -> String {
    let names: Vec<&str> = targets
        .iter()
        .map(|target| match target {
            Target::Migrations => "migrations",
            Target::Models => "models",
            Target::Controllers => "controllers",
        })
        .collect();

    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::*;

    fn database(temp: &TempDir) -> String {
        let path = temp.path().join("app.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE policy_coverages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                policy_id BIGINT NOT NULL,
                amount DECIMAL(10,2) NOT NULL,
                created_at DATETIME,
                updated_at DATETIME
            );
            CREATE TABLE migrations (id INTEGER PRIMARY KEY, migration VARCHAR(255));",
        )
        .unwrap();
        path.display().to_string()
    }

    fn config(database: &str) -> Config {
        format!(
            r#"
            [database]
            driver = "sqlite"
            path = "{}"

            [global]
            ignore_tables = ["migrations"]

            [migrations]
            file_prefix = "index"
            "#,
            database.replace('\\', "/")
        )
        .parse()
        .unwrap()
    }

    fn options<'a>(output_dir: &'a Path, dry_run: bool) -> GenerateOptions<'a> {
        GenerateOptions {
            output_dir,
            dry_run,
            message: "Migrations generated successfully.",
        }
    }

    #[test]
    fn test_generate_writes_files() {
        let temp = TempDir::new().unwrap();
        let config = config(&database(&temp));
        let out = temp.path().join("app");

        let summary = generate(&config, &[Target::Migrations], options(&out, false)).unwrap();

        let GenerationResult::Written(report) = &summary.result else {
            panic!("expected written result");
        };
        assert_eq!(report.created(), 1);
        assert_eq!(report.ignored_tables, vec!["migrations".to_string()]);
        assert!(
            out.join("database/migrations/0001_create_policy_coverages_table.php")
                .exists()
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config(&database(&temp));
        let out = temp.path().join("app");

        let summary = generate(&config, &Target::ALL, options(&out, true)).unwrap();

        let GenerationResult::Preview(preview) = &summary.result else {
            panic!("expected preview result");
        };
        assert_eq!(preview.files.len(), 3);
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_database_fails() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp.path().join("absent.sqlite").display().to_string());

        let result = generate(&config, &[Target::Models], options(temp.path(), false));
        assert!(result.is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&[Target::Models]), "models");
        assert_eq!(describe(&Target::ALL), "controllers, models and migrations");
    }
}
