//! Reflect a live database schema into a normalized, backend-agnostic model.
//!
//! ```ignore
//! let reflector = tablecraft_schema::connect(&config.database)?;
//! for name in reflector.list_tables(&config.global.ignore_tables)? {
//!     let table = reflector.reflect_table(&name)?;
//! }
//! ```

mod error;
mod model;
mod normalize;
mod reflect;

pub use error::{ReflectionError, Result};
pub use model::{Column, ColumnType, ForeignKey, RawColumn, ReferentialAction, Table};
pub use normalize::normalize;
pub use reflect::{Dialect, MySqlReflector, SchemaReflector, SqliteReflector, connect};
