//! Experiment table: algorithms × benchmarks grid of text cells.
//!
//! Row 0 names the benchmarks, column 0 names the algorithms and cell (0,0)
//! is the reserved corner. Structural operations never mutate in place; each
//! returns a fresh table so earlier values stay untouched.
//!
//! Cell contents are not checked here. Shape and content rules are enforced
//! by the validator as a separate, explicit gate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// A rectangular grid of cell strings, serialized as a bare `string[][]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::initial()
    }
}

impl Table {
    /// Session-start shape: header row and column plus one empty data cell.
    pub fn initial() -> Self {
        Self {
            rows: vec![
                vec![String::new(), String::new()],
                vec![String::new(), String::new()],
            ],
        }
    }

    /// Wholesale construction from parsed rows. No shape checks are made.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Number of rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the header row (0 for an empty table).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// True when every row has the width of the header row.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Benchmark identifiers (header row without the corner cell).
    pub fn benchmarks(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|header| header.iter().skip(1).map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Algorithm identifiers (first column without the corner cell).
    pub fn algorithms(&self) -> Vec<&str> {
        self.rows
            .iter()
            .skip(1)
            .map(|row| row.first().map_or("", String::as_str))
            .collect()
    }

    /// Append an algorithm row of empty cells, as wide as the header row.
    pub fn add_row(&self) -> Table {
        let mut rows = self.rows.clone();
        rows.push(vec![String::new(); self.column_count()]);
        Table { rows }
    }

    /// Append an empty benchmark cell to every row.
    pub fn add_column(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(String::new());
                row
            })
            .collect();
        Table { rows }
    }

    /// Remove an algorithm row. Row 0 is structural and is rejected.
    pub fn remove_row(&self, index: usize) -> Result<Table, TableError> {
        if index == 0 {
            return Err(TableError::ProtectedHeaderRow);
        }
        if index >= self.row_count() {
            return Err(TableError::RowOutOfRange {
                index,
                rows: self.row_count(),
            });
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, row)| row.clone())
            .collect();
        Ok(Table { rows })
    }

    /// Remove a benchmark column. Column 0 is structural and is rejected.
    pub fn remove_column(&self, index: usize) -> Result<Table, TableError> {
        if index == 0 {
            return Err(TableError::ProtectedHeaderColumn);
        }
        if index >= self.column_count() {
            return Err(TableError::ColumnOutOfRange {
                index,
                columns: self.column_count(),
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != index)
                    .map(|(_, cell)| cell.clone())
                    .collect()
            })
            .collect();
        Ok(Table { rows })
    }

    /// Replace one cell value.
    pub fn set_cell(
        &self,
        row: usize,
        column: usize,
        value: impl Into<String>,
    ) -> Result<Table, TableError> {
        let Some(cells) = self.rows.get(row) else {
            return Err(TableError::RowOutOfRange {
                index: row,
                rows: self.row_count(),
            });
        };
        if column >= cells.len() {
            return Err(TableError::ColumnOutOfRange {
                index: column,
                columns: cells.len(),
            });
        }
        let mut rows = self.rows.clone();
        rows[row][column] = value.into();
        Ok(Table { rows })
    }

    /// Each row as an ordered `column1..columnN -> cell` record.
    pub fn extract_records(&self) -> Vec<BTreeMap<String, String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, cell)| (format!("column{}", idx + 1), cell.clone()))
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}
