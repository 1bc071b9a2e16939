//! Selection cardinality per analysis mode.

use aam_model::{AnalysisMode, ExperimentError, Result, Selection};

/// Check that the selected rows fit the analysis mode.
///
/// `row_count` includes the header row.
pub fn validate_analysis_mode(
    mode: AnalysisMode,
    selection: &Selection,
    row_count: usize,
) -> Result<()> {
    let selected = selection.len();
    let message = match mode {
        AnalysisMode::Pairwise if selected < 2 => {
            Some("At least two rows must be selected for pairwise analysis.")
        }
        AnalysisMode::Pairwise if selected > 2 => {
            Some("More than two rows cannot be selected for pairwise analysis.")
        }
        AnalysisMode::Control if selected < 1 => {
            Some("At least one row must be selected for control analysis.")
        }
        AnalysisMode::Control if selected > 1 => {
            Some("More than one row cannot be selected for control analysis.")
        }
        AnalysisMode::All if selected != row_count.saturating_sub(1) => {
            Some("All rows must be selected for all analysis.")
        }
        AnalysisMode::Pairwise | AnalysisMode::Control | AnalysisMode::All => None,
    };
    match message {
        Some(message) => Err(ExperimentError::Selection(message.to_string())),
        None => {
            tracing::debug!(mode = %mode, selected, "analysis mode validated");
            Ok(())
        }
    }
}
