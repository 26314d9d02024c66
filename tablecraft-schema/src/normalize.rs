//! Native column types to portable tags.

use crate::{Column, ColumnType, RawColumn};

/// Substring tests applied to the lower-cased native type. First match wins,
/// so `bigint` must come before `int` and `datetime`/`timestamp` before `date`.
const TYPE_RULES: &[(&str, ColumnType)] = &[
    ("bigint", ColumnType::BigInteger),
    ("int", ColumnType::Integer),
    ("varchar", ColumnType::String),
    ("text", ColumnType::Text),
    ("datetime", ColumnType::DateTime),
    ("timestamp", ColumnType::Timestamp),
    ("date", ColumnType::Date),
    ("float", ColumnType::Float),
    ("decimal", ColumnType::Decimal),
];

/// Normalize a raw backend column.
pub fn normalize(raw: &RawColumn) -> Column {
    let native = raw.native_type.trim().to_ascii_lowercase();

    let is_primary_key = raw
        .key
        .as_deref()
        .is_some_and(|k| k.trim().eq_ignore_ascii_case("pri"));
    let is_auto_increment = raw
        .extra
        .as_deref()
        .is_some_and(|e| e.to_ascii_lowercase().contains("auto_increment"));

    let column_type = map_type(&native, is_primary_key && is_auto_increment);

    let length = match column_type {
        ColumnType::String if native.contains("varchar") => {
            type_arguments(&native).first().copied()
        }
        _ => None,
    };
    let precision = match column_type {
        ColumnType::Decimal => match type_arguments(&native).as_slice() {
            [p] => Some((*p, 0)),
            [p, s, ..] => Some((*p, *s)),
            [] => None,
        },
        _ => None,
    };

    Column {
        name: raw.name.clone(),
        native_type: raw.native_type.clone(),
        column_type,
        nullable: raw.nullable.unwrap_or(false),
        default: raw.default.as_deref().and_then(normalize_default),
        is_primary_key,
        is_auto_increment,
        unsigned: native.contains("unsigned"),
        length,
        precision,
    }
}

fn map_type(native: &str, identity: bool) -> ColumnType {
    if identity && native.contains("int") {
        return if native.contains("bigint") {
            ColumnType::BigIncrements
        } else {
            ColumnType::Increments
        };
    }

    TYPE_RULES
        .iter()
        .find(|(needle, _)| native.contains(needle))
        .map(|(_, ty)| *ty)
        .unwrap_or(ColumnType::String)
}

/// Numeric arguments of `name(a, b)`; empty when absent or malformed.
fn type_arguments(native: &str) -> Vec<u32> {
    let Some(open) = native.find('(') else {
        return Vec::new();
    };
    let Some(close) = native[open..].find(')') else {
        return Vec::new();
    };

    native[open + 1..open + close]
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default()
}

/// Strip quoting from a reported default; a `NULL` literal means no default.
fn normalize_default(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.eq_ignore_ascii_case("null") {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower == "current_timestamp" || lower == "current_timestamp()" {
        return Some("CURRENT_TIMESTAMP".to_string());
    }

    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            let inner = &trimmed[1..trimmed.len() - 1];
            let doubled = format!("{}{}", quote, quote);
            return Some(inner.replace(&doubled, &quote.to_string()));
        }
    }

    Some(trimmed.to_string())
}
