use indexmap::IndexMap;
use serde::Deserialize;

use crate::Scoped;

/// Model generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory models are written to, relative to the output base
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// PHP namespace of the generated models
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Fully qualified class every model extends
    #[serde(default = "default_base_model")]
    pub base_model: String,

    /// Singularize table names when deriving class names
    #[serde(default = "default_true")]
    pub pluralize: bool,

    /// Emitted as `$perPage` when set
    #[serde(default = "default_per_page")]
    pub per_page: Option<u32>,

    /// Emit a `$columns` list with every column of the table
    #[serde(default)]
    pub columns: bool,

    /// Emitted as `$dateFormat` when set
    #[serde(default)]
    pub date_format: Option<String>,

    /// Traits used by the model (fully qualified)
    #[serde(default)]
    pub traits: Scoped<Vec<String>>,

    #[serde(default)]
    pub fillable: Scoped<Vec<String>>,

    #[serde(default)]
    pub guarded: Scoped<Vec<String>>,

    /// Column -> cast type
    #[serde(default)]
    pub casts: Scoped<IndexMap<String, String>>,

    /// Relationships that are always eager loaded
    #[serde(default)]
    pub with: Scoped<Vec<String>>,

    /// Hidden attributes; `*suffix` matches every column ending in `suffix`
    #[serde(default)]
    pub hidden: Scoped<Vec<String>>,

    #[serde(default)]
    pub relationships: Scoped<Vec<Relationship>>,

    /// Eloquent event -> PHP callback source, registered in `booted()`
    #[serde(default)]
    pub lifecycle_hooks: Scoped<IndexMap<String, String>>,

    /// Table name -> class name overrides
    #[serde(default)]
    pub custom_mapping: IndexMap<String, String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            namespace: default_namespace(),
            base_model: default_base_model(),
            pluralize: true,
            per_page: default_per_page(),
            columns: false,
            date_format: None,
            traits: Scoped::default(),
            fillable: Scoped::default(),
            guarded: Scoped::default(),
            casts: Scoped::default(),
            with: Scoped::default(),
            hidden: Scoped::default(),
            relationships: Scoped::default(),
            lifecycle_hooks: Scoped::default(),
            custom_mapping: IndexMap::new(),
        }
    }
}

/// Eloquent relationship kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
}

impl RelationKind {
    /// Name of the Eloquent builder method.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsToMany => "belongsToMany",
        }
    }
}

/// A relationship method added to a model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relationship {
    pub kind: RelationKind,

    /// Fully qualified related model class
    pub model: String,

    /// Method name; derived from the related model when absent
    #[serde(default)]
    pub method: Option<String>,

    /// Pivot table for `belongsToMany`
    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub foreign_key: Option<String>,

    #[serde(default)]
    pub owner_key: Option<String>,
}

fn default_output_directory() -> String {
    "app/Models".to_string()
}

fn default_namespace() -> String {
    "App\\Models".to_string()
}

fn default_base_model() -> String {
    "Illuminate\\Database\\Eloquent\\Model".to_string()
}

fn default_true() -> bool {
    true
}

fn default_per_page() -> Option<u32> {
    Some(25)
}
