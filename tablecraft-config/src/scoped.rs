use indexmap::IndexMap;
use serde::Deserialize;

/// Key used for the fallback entry of a per-table map.
pub const WILDCARD: &str = "*";

/// A model setting that is either global or keyed by table name.
///
/// ```toml
/// fillable = ["name"]                      # every table
///
/// [models.fillable]                        # per table, "*" as fallback
/// "*" = []
/// users = ["name", "email"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scoped<T> {
    All(T),
    PerTable(IndexMap<String, T>),
}

impl<T> Scoped<T> {
    /// Value that applies to `table`: its own entry, else the `"*"` entry.
    pub fn for_table(&self, table: &str) -> Option<&T> {
        match self {
            Scoped::All(value) => Some(value),
            Scoped::PerTable(map) => map.get(table).or_else(|| map.get(WILDCARD)),
        }
    }
}

impl<T: Default> Default for Scoped<T> {
    fn default() -> Self {
        Scoped::All(T::default())
    }
}
