//! Table names to PHP class names.

use tablecraft_config::Config;
use tablecraft_core::{capitalize, singularize};

/// Derives model and controller class names from table names.
///
/// `policy_coverages` becomes `Policycoverage` / `PolicycoverageController`:
/// the table prefix is stripped, underscores removed, the result singularized
/// and capitalized. `models.custom_mapping` overrides the model name.
#[derive(Debug, Clone, Copy)]
pub struct ClassNamer<'a> {
    config: &'a Config,
}

impl<'a> ClassNamer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn model(&self, table: &str) -> String {
        if let Some(mapped) = self.config.models.custom_mapping.get(table) {
            return mapped.clone();
        }

        let prefix = self.config.global.table_prefix.as_str();
        let stripped = if prefix.is_empty() {
            table
        } else {
            table.strip_prefix(prefix).unwrap_or(table)
        };

        let joined = stripped.replace('_', "");
        let name = if self.config.models.pluralize {
            singularize(&joined)
        } else {
            joined
        };

        capitalize(&name)
    }

    pub fn controller(&self, table: &str) -> String {
        format!("{}Controller", self.model(table))
    }
}

/// Last segment of a namespaced class (`App\Models\User` -> `User`).
pub fn class_basename(class: &str) -> &str {
    let trimmed = class.trim_start_matches('\\');
    trimmed.rsplit('\\').next().unwrap_or(trimmed)
}

/// Lower-case the first character (`Policycoverage` -> `policycoverage`).
pub fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
