//! CSV serialization.

use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use aam_model::Table;

/// Serialize the table, quoting cells only when needed.
pub fn table_to_csv(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in table.rows() {
        writer.write_record(row).context("write csv record")?;
    }
    let bytes = writer.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

/// Download name for an exported table.
pub fn csv_file_name(title: &str) -> String {
    format!("{title}.csv")
}

pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let contents = table_to_csv(table)?;
    std::fs::write(path, contents).with_context(|| format!("write csv: {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.row_count(), "csv exported");
    Ok(())
}
