use serde::Deserialize;

use crate::ConfigurationError;

/// Columns managed by a `timestamps()` call.
pub const TIMESTAMP_COLUMNS: &[&str] = &["created_at", "updated_at"];

/// Columns managed by a `softDeletes()` call.
pub const SOFT_DELETE_COLUMNS: &[&str] = &["deleted_at"];

/// Settings shared by every generator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Tables that never produce output
    #[serde(default)]
    pub ignore_tables: Vec<String>,

    /// Replace the configured common fields with a single `commonFields()` call
    #[serde(default)]
    pub use_common_fields: bool,

    /// Replace `created_at`/`updated_at` with a single `timestamps()` call
    #[serde(default)]
    pub use_timestamps: bool,

    /// Replace `deleted_at` with a single `softDeletes()` call
    #[serde(default)]
    pub use_soft_deletes: bool,

    /// Emit enabled shared-field calls even for tables that have none of the columns
    #[serde(default)]
    pub force_shared_fields: bool,

    /// Prefix stripped from table names before deriving class names
    #[serde(default)]
    pub table_prefix: String,

    /// Field definitions behind the `commonFields()` Blueprint macro
    #[serde(default)]
    pub common_fields: Vec<SharedFieldSpec>,
}

/// A common field as written in the configuration file.
///
/// Every key is an untyped TOML value; [`GlobalConfig::common_fields`]
/// reports and skips entries with missing or mistyped keys.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedFieldSpec {
    #[serde(default)]
    pub name: Option<toml::Value>,

    /// Schema builder method (`bigInteger`, `string`, `enum`, `timestamps`, `softDeletes`, ...)
    #[serde(default, rename = "type")]
    pub ty: Option<toml::Value>,

    #[serde(default)]
    pub unsigned: Option<toml::Value>,

    #[serde(default)]
    pub nullable: Option<toml::Value>,

    #[serde(default)]
    pub default: Option<toml::Value>,

    #[serde(default, alias = "values")]
    pub enum_values: Option<toml::Value>,
}

/// A validated common field.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedField {
    pub name: String,
    pub kind: SharedFieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SharedFieldKind {
    /// A plain typed column, e.g. `bigInteger('created_by')`
    Column {
        ty: String,
        unsigned: bool,
        nullable: bool,
        default: Option<String>,
    },
    /// An enum column with a non-empty value list
    Enum {
        values: Vec<String>,
        nullable: bool,
        default: Option<String>,
    },
    /// `created_at` + `updated_at`
    Timestamps,
    /// `deleted_at`
    SoftDeletes,
}

impl SharedField {
    /// Database columns this field stands for.
    pub fn column_names(&self) -> Vec<&str> {
        match self.kind {
            SharedFieldKind::Timestamps => TIMESTAMP_COLUMNS.to_vec(),
            SharedFieldKind::SoftDeletes => SOFT_DELETE_COLUMNS.to_vec(),
            _ => vec![self.name.as_str()],
        }
    }
}

/// Result of validating `global.common_fields`.
#[derive(Debug, Clone, Default)]
pub struct SharedFields {
    /// Fields that passed validation, in configuration order
    pub fields: Vec<SharedField>,
    /// Problems found; each one caused a field to be skipped or is advisory
    pub errors: Vec<ConfigurationError>,
}

impl SharedFields {
    /// All database columns covered by the valid fields, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().flat_map(|f| f.column_names()).collect()
    }
}

impl GlobalConfig {
    /// Validate the common field definitions.
    ///
    /// Invalid entries are dropped and reported; this never fails.
    pub fn common_fields(&self) -> SharedFields {
        let mut result = SharedFields::default();

        for (index, spec) in self.common_fields.iter().enumerate() {
            let location = format!("global.common_fields[{}]", index);
            match resolve_field(spec) {
                Ok(field) => result.fields.push(field),
                Err(message) => result.errors.push(ConfigurationError::new(location, message)),
            }
        }

        if self.use_common_fields {
            let has = |kind: &SharedFieldKind| result.fields.iter().any(|f| &f.kind == kind);
            if self.use_timestamps && has(&SharedFieldKind::Timestamps) {
                result.errors.push(ConfigurationError::new(
                    "global.use_timestamps",
                    "timestamps are also listed in common_fields; commonFields() takes precedence",
                ));
            }
            if self.use_soft_deletes && has(&SharedFieldKind::SoftDeletes) {
                result.errors.push(ConfigurationError::new(
                    "global.use_soft_deletes",
                    "softDeletes is also listed in common_fields; commonFields() takes precedence",
                ));
            }
        }

        result
    }
}

fn resolve_field(spec: &SharedFieldSpec) -> Result<SharedField, String> {
    let ty = string_key("type", spec.ty.as_ref())?.unwrap_or_default();
    let ty = ty.trim();
    let name = string_key("name", spec.name.as_ref())?;
    let name = name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    match ty {
        "timestamps" => Ok(SharedField {
            name: name.unwrap_or(ty).to_string(),
            kind: SharedFieldKind::Timestamps,
        }),
        "softDeletes" => Ok(SharedField {
            name: name.unwrap_or(ty).to_string(),
            kind: SharedFieldKind::SoftDeletes,
        }),
        "" => Err("missing 'type'".to_string()),
        _ => {
            let name = name
                .ok_or_else(|| format!("'{}' field is missing a 'name'", ty))?
                .to_string();
            let nullable = bool_key(&name, "nullable", spec.nullable.as_ref())?;

            let default = match &spec.default {
                None => None,
                Some(value) => Some(scalar_to_string(value).ok_or_else(|| {
                    format!("'default' for field '{}' must be a scalar value", name)
                })?),
            };

            let kind = if ty == "enum" {
                SharedFieldKind::Enum {
                    values: enum_values(&name, spec.enum_values.as_ref())?,
                    nullable,
                    default,
                }
            } else {
                SharedFieldKind::Column {
                    ty: ty.to_string(),
                    unsigned: bool_key(&name, "unsigned", spec.unsigned.as_ref())?,
                    nullable,
                    default,
                }
            };

            Ok(SharedField { name, kind })
        }
    }
}

fn string_key(key: &str, value: Option<&toml::Value>) -> Result<Option<String>, String> {
    match value {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!(
            "'{}' must be a string, found {}",
            key,
            other.type_str()
        )),
    }
}

fn bool_key(name: &str, key: &str, value: Option<&toml::Value>) -> Result<bool, String> {
    match value {
        None => Ok(false),
        Some(toml::Value::Boolean(b)) => Ok(*b),
        Some(_) => Err(format!("'{}' for field '{}' must be true or false", key, name)),
    }
}

fn enum_values(name: &str, value: Option<&toml::Value>) -> Result<Vec<String>, String> {
    let items = match value {
        None => return Err(format!("missing 'enum_values' for enum field '{}'", name)),
        Some(toml::Value::Array(items)) => items,
        Some(_) => return Err(format!("'enum_values' for field '{}' must be a list", name)),
    };

    if items.is_empty() {
        return Err(format!("'enum_values' for field '{}' must not be empty", name));
    }

    items
        .iter()
        .map(|item| {
            scalar_to_string(item)
                .ok_or_else(|| format!("'enum_values' for field '{}' must hold scalars", name))
        })
        .collect()
}

/// Convert a scalar TOML value to its string representation
fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
