//! Validation gates run before an experiment is submitted.
//!
//! Every check is fail-fast: it stops at the first violation and reports only
//! that one. Fixing it and re-running reveals the next.

mod alpha;
mod selection;
mod table;

pub use alpha::{parse_alpha, validate_alpha};
pub use selection::validate_analysis_mode;
pub use table::{is_identifier, is_numeric_cell, validate_experiment_table};

use aam_model::{AnalysisMode, Result, Selection, Table};

/// Run all submission gates in order: analysis mode, alpha, table.
pub fn validate_submission(
    mode: AnalysisMode,
    selection: &Selection,
    alpha: f64,
    table: &Table,
) -> Result<()> {
    validate_analysis_mode(mode, selection, table.row_count())?;
    validate_alpha(alpha)?;
    validate_experiment_table(table)
}
