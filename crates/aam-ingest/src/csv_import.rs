//! CSV import into an experiment table.
//!
//! The import replaces the current table wholesale. It runs a structural
//! pre-check (consistent column count) so a clearly malformed file fails
//! before the general validator ever sees it. Cell contents are left to the
//! validator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Position, ReaderBuilder, StringRecord};

use aam_model::{ExperimentError, Table};

use crate::error::{IngestError, Result};

/// A parsed CSV file ready to become the session table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvImport {
    pub table: Table,
    /// Default experiment name derived from the source file name.
    pub experiment_name: String,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// File name with a trailing `.csv` (any case) removed.
pub fn experiment_name_from_file(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    let len = name.len();
    if len >= 4
        && name.is_char_boundary(len - 4)
        && name[len - 4..].eq_ignore_ascii_case(".csv")
    {
        name[..len - 4].to_string()
    } else {
        name.to_string()
    }
}

/// Turn raw parsed rows into a table.
///
/// A trailing row whose cells are all empty is dropped, the remaining rows
/// must share the first row's width, every cell is trimmed and the corner
/// cell is forced empty.
pub fn rows_to_table(mut rows: Vec<Vec<String>>) -> std::result::Result<Table, ExperimentError> {
    if rows
        .last()
        .is_some_and(|row| row.iter().all(|cell| cell.trim().is_empty()))
    {
        rows.pop();
    }
    let Some(first) = rows.first() else {
        return Err(ExperimentError::Structural("CSV file is empty.".to_string()));
    };
    let width = first.len();
    if rows.iter().any(|row| row.len() != width) {
        return Err(ExperimentError::Structural(
            "CSV file does not have a consistent number of columns.".to_string(),
        ));
    }
    let mut rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| normalize_cell(cell)).collect())
        .collect();
    if let Some(corner) = rows.first_mut().and_then(|row| row.first_mut()) {
        corner.clear();
    }
    Ok(Table::from_rows(rows))
}

/// Read every record without header handling; ragged rows are kept so the
/// pre-check can report them.
///
/// The reader skips blank lines. Each blank line before or between records
/// comes back as a single empty cell so a gap fails the width check; blank
/// lines after the last record are kept the same way, the final line break
/// being the record terminator.
fn read_rows<R: Read>(mut reader: R) -> Result<Vec<Vec<String>>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(csv::Error::from)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let start = record.position().map_or(0, |position| byte_offset(position, &bytes));
        let breaks = line_breaks_around(&bytes, start);
        let blank = if rows.is_empty() {
            breaks
        } else {
            breaks.saturating_sub(1)
        };
        rows.extend(std::iter::repeat_with(|| vec![String::new()]).take(blank));
        rows.push(record.iter().map(str::to_string).collect());
    }
    if !rows.is_empty() {
        let end = byte_offset(reader.position(), &bytes);
        let blank = line_breaks_around(&bytes, end).saturating_sub(1);
        rows.extend(std::iter::repeat_with(|| vec![String::new()]).take(blank));
    }
    Ok(rows)
}

fn byte_offset(position: &Position, bytes: &[u8]) -> usize {
    usize::try_from(position.byte()).map_or(bytes.len(), |offset| offset.min(bytes.len()))
}

/// Line breaks in the run of `\r`/`\n` bytes touching `at`; `\r\n` counts once.
fn line_breaks_around(bytes: &[u8], at: usize) -> usize {
    let is_break = |byte: &&u8| matches!(**byte, b'\r' | b'\n');
    let before = bytes[..at].iter().rev().take_while(is_break).count();
    let after = bytes[at..].iter().take_while(is_break).count();
    let mut run = bytes[at - before..at + after].iter().peekable();
    let mut breaks = 0;
    while let Some(&byte) = run.next() {
        if byte == b'\r' && run.peek() == Some(&&b'\n') {
            run.next();
        }
        breaks += 1;
    }
    breaks
}

pub fn import_csv_reader<R: Read>(reader: R, file_name: &str) -> Result<CsvImport> {
    let rows = read_rows(reader)?;
    let raw_rows = rows.len();
    let table = rows_to_table(rows)?;
    let experiment_name = experiment_name_from_file(file_name);
    tracing::info!(
        file = file_name,
        raw_rows,
        rows = table.row_count(),
        columns = table.column_count(),
        "csv imported"
    );
    Ok(CsvImport {
        table,
        experiment_name,
    })
}

pub fn import_csv_str(contents: &str, file_name: &str) -> Result<CsvImport> {
    import_csv_reader(contents.as_bytes(), file_name)
}

pub fn import_csv_path(path: &Path) -> Result<CsvImport> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    import_csv_reader(file, file_name)
}
