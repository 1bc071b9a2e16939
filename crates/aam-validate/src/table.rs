//! Experiment table validation.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. table is non-empty
//! 2. at least one benchmark column and one algorithm row
//! 3. every row as wide as the header row
//! 4. corner cell empty
//! 5. benchmark identifiers: charset, then uniqueness
//! 6. algorithm identifiers: charset, then uniqueness
//! 7. every data cell numeric, row-major

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use aam_model::{ExperimentError, Result, Table};

/// Benchmark and algorithm identifiers.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9\-_*#$]+$").expect("Invalid identifier regex"));

/// Data cells: digits and dots with an optional unsigned-mantissa exponent.
/// Signs are not accepted, so negative values fail.
static NUMERIC_CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\d.]+(?:e-?\d+)?$").expect("Invalid numeric cell regex"));

const IDENTIFIER_SYMBOLS: &str = "-, _, *, $, #";

pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER_REGEX.is_match(value)
}

pub fn is_numeric_cell(value: &str) -> bool {
    NUMERIC_CELL_REGEX.is_match(value)
}

fn value_found(value: &str) -> String {
    if value.is_empty() {
        "Cell was empty.".to_string()
    } else {
        format!("Value found: {value}.")
    }
}

/// Validate the full experiment table. Only the first violation is reported.
pub fn validate_experiment_table(table: &Table) -> Result<()> {
    check_shape(table)?;
    let rows = table.rows();

    let corner = rows[0][0].as_str();
    if !corner.is_empty() {
        return Err(ExperimentError::Structural(format!(
            "First cell of first row must be empty. {}",
            value_found(corner)
        )));
    }

    check_identifiers(
        rows[0].iter().enumerate().skip(1),
        |idx| (0, idx),
        "Duplicate benchmark identifiers detected.",
    )?;
    check_identifiers(
        rows.iter().enumerate().skip(1).map(|(idx, row)| (idx, &row[0])),
        |idx| (idx, 0),
        "Duplicate algorithm identifiers detected.",
    )?;

    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        for (col_idx, cell) in row.iter().enumerate().skip(1) {
            if !is_numeric_cell(cell) {
                return Err(ExperimentError::Value(format!(
                    "Cell [{row_idx}][{col_idx}] must be numeric (scientific notation allowed). {}",
                    value_found(cell)
                )));
            }
        }
    }

    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "experiment table validated"
    );
    Ok(())
}

fn check_shape(table: &Table) -> Result<()> {
    if table.is_empty() {
        return Err(ExperimentError::Structural("Table is empty".to_string()));
    }
    if table.column_count() < 2 {
        return Err(ExperimentError::Structural(
            "There should be at least one benchmark function.".to_string(),
        ));
    }
    if table.row_count() < 2 {
        return Err(ExperimentError::Structural(
            "There should be at least one algorithm.".to_string(),
        ));
    }
    let expected = table.column_count();
    if let Some((idx, row)) = table
        .rows()
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        return Err(ExperimentError::Structural(format!(
            "Row {idx} has {} cells, expected {expected}.",
            row.len()
        )));
    }
    Ok(())
}

/// Charset check over every identifier, then a uniqueness check.
fn check_identifiers<'a>(
    cells: impl Iterator<Item = (usize, &'a String)>,
    position: impl Fn(usize) -> (usize, usize),
    duplicate_message: &str,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    let mut total = 0usize;
    for (idx, value) in cells {
        if !is_identifier(value) {
            let (row, column) = position(idx);
            return Err(ExperimentError::Naming(format!(
                "Cell [{row}][{column}] must be alphanumeric or contain any of these symbols: {IDENTIFIER_SYMBOLS}. {}",
                value_found(value)
            )));
        }
        seen.insert(value.as_str());
        total += 1;
    }
    if seen.len() != total {
        return Err(ExperimentError::Naming(duplicate_message.to_string()));
    }
    Ok(())
}
