//! Inspect operation - print what reflection sees.

use eyre::Result;
use tablecraft_config::Config;

use crate::reports::InspectReport;

/// Execute the inspect operation.
///
/// Tables in `global.ignore_tables` are listed by name only, unless
/// `include_ignored` is set.
pub fn inspect(config: &Config, include_ignored: bool) -> Result<InspectReport> {
    let reflector = tablecraft_schema::connect(&config.database)?;

    let (names, ignored): (Vec<String>, Vec<String>) = reflector
        .list_tables(&[])?
        .into_iter()
        .partition(|name| include_ignored || !config.is_ignored(name));

    let tables = names
        .iter()
        .map(|name| reflector.reflect_table(name))
        .collect::<tablecraft_schema::Result<Vec<_>>>()?;

    Ok(InspectReport {
        dialect: reflector.dialect(),
        tables,
        ignored,
    })
}
