//! Reflection-driven generation of migrations, models and controllers.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime, TimeDelta};
use eyre::Result;
use tablecraft_config::{Config, ConfigurationError, FilePrefix, SharedFields};
use tablecraft_core::{GeneratedFile, WriteResult};
use tablecraft_schema::{SchemaReflector, Table};

use crate::{
    ClassNamer,
    files::{
        BlueprintMacroFile, ControllerFile, ForeignKeysMigrationFile, MigrationFile, ModelFile,
    },
};

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// What a generate command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Migrations,
    Models,
    Controllers,
}

impl Target {
    /// Order used by `generate-all`.
    pub const ALL: [Target; 3] = [Target::Controllers, Target::Models, Target::Migrations];
}

/// Kind of an emitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Migration,
    ForeignKeys,
    Model,
    Controller,
    BlueprintMacro,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Migration => "migration",
            FileKind::ForeignKeys => "foreign keys",
            FileKind::Model => "model",
            FileKind::Controller => "controller",
            FileKind::BlueprintMacro => "blueprint macro",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub kind: FileKind,
    pub path: PathBuf,
    pub result: WriteResult,
}

/// Result of a generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Files in the order they were written
    pub files: Vec<FileOutcome>,
    /// Tables skipped because of `global.ignore_tables`
    pub ignored_tables: Vec<String>,
    /// Configuration problems that did not stop generation
    pub warnings: Vec<ConfigurationError>,
    /// Fully qualified service provider class, when one was written
    pub provider: Option<String>,
}

impl GenerateReport {
    pub fn created(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_created()).count()
    }

    pub fn skipped(&self) -> usize {
        self.files.len() - self.created()
    }
}

/// A rendered file that was not written.
#[derive(Debug)]
pub struct PreviewFile {
    pub kind: FileKind,
    /// Path relative to the output base
    pub path: PathBuf,
    pub content: String,
}

/// Prefix policy for migration file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationNaming {
    /// `0001`, `0002`, ...
    Index,
    /// `YYYY_MM_DD_HHMMSS`, fixed for the whole run
    Timestamp(NaiveDateTime),
}

impl MigrationNaming {
    pub fn new(prefix: FilePrefix, now: NaiveDateTime) -> Self {
        match prefix {
            FilePrefix::Index => MigrationNaming::Index,
            FilePrefix::Timestamp => MigrationNaming::Timestamp(now),
        }
    }

    /// Prefix of the per-table migration at `position` (zero-based).
    pub fn prefix(&self, position: usize) -> String {
        match self {
            MigrationNaming::Index => format!("{:04}", position + 1),
            MigrationNaming::Timestamp(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Prefix of the foreign key migration, sorting after `count` table migrations.
    pub fn foreign_keys_prefix(&self, count: usize) -> String {
        match self {
            MigrationNaming::Index => format!("{:04}", count + 1),
            MigrationNaming::Timestamp(at) => (*at + TimeDelta::seconds(1))
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// Reflected tables split by the ignore list.
struct Schema {
    tables: Vec<Table>,
    ignored: Vec<String>,
}

type Pending<'a> = Vec<(FileKind, Box<dyn GeneratedFile + 'a>)>;

/// Generates Laravel sources from a live database.
///
/// The schema is reflected once per call; emitted files are never
/// overwritten, so repeated runs only add what is missing.
pub struct Generator<'a> {
    config: &'a Config,
    reflector: &'a dyn SchemaReflector,
    naming: MigrationNaming,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, reflector: &'a dyn SchemaReflector) -> Self {
        Self {
            config,
            reflector,
            naming: MigrationNaming::new(
                config.migrations.file_prefix,
                Local::now().naive_local(),
            ),
        }
    }

    /// Fix the clock used for timestamp prefixes.
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.naming = MigrationNaming::new(self.config.migrations.file_prefix, now);
        self
    }

    pub fn migrations(&self, base: &Path) -> Result<GenerateReport> {
        self.generate(&[Target::Migrations], base)
    }

    pub fn models(&self, base: &Path) -> Result<GenerateReport> {
        self.generate(&[Target::Models], base)
    }

    pub fn controllers(&self, base: &Path) -> Result<GenerateReport> {
        self.generate(&[Target::Controllers], base)
    }

    /// Controllers, then models, then migrations.
    pub fn all(&self, base: &Path) -> Result<GenerateReport> {
        self.generate(&Target::ALL, base)
    }

    /// Write every file for `targets` under `base`.
    pub fn generate(&self, targets: &[Target], base: &Path) -> Result<GenerateReport> {
        let schema = self.reflect()?;
        let shared = self.shared_fields();

        let mut report = GenerateReport {
            ignored_tables: schema.ignored.clone(),
            warnings: shared.errors.clone(),
            ..Default::default()
        };

        for (kind, file) in self.pending(&schema, &shared, targets) {
            let result = file.write(base)?;
            if kind == FileKind::BlueprintMacro && result.is_created() {
                report.provider = Some(self.provider_class());
            }
            report.files.push(FileOutcome {
                kind,
                path: file.path(base),
                result,
            });
        }

        tracing::info!(
            created = report.created(),
            skipped = report.skipped(),
            "generation finished"
        );
        Ok(report)
    }

    /// Render every file for `targets` without touching the file system.
    pub fn preview(&self, targets: &[Target]) -> Result<Vec<PreviewFile>> {
        let schema = self.reflect()?;
        let shared = self.shared_fields();

        Ok(self
            .pending(&schema, &shared, targets)
            .into_iter()
            .map(|(kind, file)| PreviewFile {
                kind,
                path: file.path(Path::new("")),
                content: file.render(),
            })
            .collect())
    }

    fn reflect(&self) -> Result<Schema> {
        let names = self.reflector.list_tables(&[])?;

        let mut schema = Schema {
            tables: Vec::with_capacity(names.len()),
            ignored: Vec::new(),
        };
        for name in names {
            if self.config.is_ignored(&name) {
                tracing::info!(table = %name, "skipping ignored table");
                schema.ignored.push(name);
                continue;
            }
            schema.tables.push(self.reflector.reflect_table(&name)?);
        }

        Ok(schema)
    }

    fn shared_fields(&self) -> SharedFields {
        let shared = self.config.global.common_fields();
        for error in &shared.errors {
            tracing::info!(
                location = %error.location,
                "skipping shared field: {}",
                error.message
            );
        }
        shared
    }

    fn provider_class(&self) -> String {
        BlueprintMacroFile::new(&self.config.migrations.providers_directory, &[]).class()
    }

    fn pending<'s>(
        &'s self,
        schema: &'s Schema,
        shared: &'s SharedFields,
        targets: &[Target],
    ) -> Pending<'s> {
        let namer = ClassNamer::new(self.config);
        let mut pending: Pending<'s> = Vec::new();

        for target in targets {
            match target {
                Target::Controllers => {
                    for table in &schema.tables {
                        let model = namer.model(&table.name);
                        let file = ControllerFile::new(
                            self.config,
                            namer.controller(&table.name),
                            model,
                            table,
                        );
                        pending.push((FileKind::Controller, Box::new(file)));
                    }
                }
                Target::Models => {
                    for table in &schema.tables {
                        let file = ModelFile::new(self.config, namer.model(&table.name), table);
                        pending.push((FileKind::Model, Box::new(file)));
                    }
                }
                Target::Migrations => self.push_migrations(&mut pending, schema, shared),
            }
        }

        pending
    }

    fn push_migrations<'s>(
        &'s self,
        pending: &mut Pending<'s>,
        schema: &'s Schema,
        shared: &'s SharedFields,
    ) {
        let migrations = &self.config.migrations;
        let directory = migrations.output_directory.as_str();

        for (position, table) in schema.tables.iter().enumerate() {
            let file = MigrationFile::new(
                directory,
                self.naming.prefix(position),
                table,
                &self.config.global,
            );
            pending.push((FileKind::Migration, Box::new(file)));
        }

        let foreign_keys: Vec<_> = schema
            .tables
            .iter()
            .flat_map(|table| &table.foreign_keys)
            .collect();
        if !foreign_keys.is_empty() {
            let prefix = self.naming.foreign_keys_prefix(schema.tables.len());
            let file = ForeignKeysMigrationFile::new(directory, prefix, foreign_keys);
            pending.push((FileKind::ForeignKeys, Box::new(file)));
        }

        if self.config.global.use_common_fields {
            let file = BlueprintMacroFile::new(&migrations.providers_directory, &shared.fields);
            pending.push((FileKind::BlueprintMacro, Box::new(file)));
        }
    }
}
