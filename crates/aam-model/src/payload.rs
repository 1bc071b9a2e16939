//! Wire payloads exchanged with the analysis service.
//!
//! Field names follow the service's camelCase JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{AnalysisMode, OptimizationMode};
use crate::error::{ExperimentError, Result};
use crate::selection::Selection;
use crate::table::Table;

/// Request body for `api/analysis/<mode>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub alpha: f64,
    pub experiment_name: String,
    pub analysis_type: AnalysisMode,
    pub experiment_data: Table,
    pub selected_rows: Selection,
    pub optimization_mode: OptimizationMode,
    pub experiment_description: String,
}

impl AnalysisRequest {
    pub fn endpoint(&self) -> &'static str {
        self.analysis_type.endpoint()
    }
}

/// Stored experiment as it round-trips through persistence and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentData {
    pub experiment_name: String,
    pub experiment_table: Table,
    pub optimization_mode: OptimizationMode,
    pub alpha: f64,
}

/// Request body for `api/experiments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSubmission {
    pub experiment_name: String,
    pub experiment_data: ExperimentData,
    pub experiment_description: String,
}

impl ExperimentSubmission {
    pub const ENDPOINT: &'static str = "api/experiments";

    pub fn new(
        experiment_name: impl Into<String>,
        experiment_table: Table,
        optimization_mode: OptimizationMode,
        alpha: f64,
        experiment_description: impl Into<String>,
    ) -> Self {
        let experiment_name = experiment_name.into();
        Self {
            experiment_data: ExperimentData {
                experiment_name: experiment_name.clone(),
                experiment_table,
                optimization_mode,
                alpha,
            },
            experiment_name,
            experiment_description: experiment_description.into(),
        }
    }
}

/// Request body for `api/results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSubmission {
    pub analysis_name: String,
    pub experiment_name: String,
    pub analysis_result: Value,
    pub analysis_type: AnalysisMode,
    pub analysis_notes: String,
    pub experiment_description: String,
}

impl ResultSubmission {
    pub const ENDPOINT: &'static str = "api/results";
}

/// Successful analysis response: `{ message, result }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub result: Value,
}

/// Read the `experimentTable` of a stored experiment back into a table.
///
/// Accepts either an experiment data object or any object carrying an
/// `experimentTable` field.
pub fn table_from_experiment_payload(payload: &Value) -> Result<Table> {
    let Some(Value::Array(items)) = payload.get("experimentTable") else {
        return Err(ExperimentError::Structural(
            "experimentTable must be an array.".to_string(),
        ));
    };
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let Value::Array(cells) = item else {
            return Err(ExperimentError::Structural(
                "Each item in the experimentTable must also be an array.".to_string(),
            ));
        };
        let mut row = Vec::with_capacity(cells.len());
        for cell in cells {
            let Value::String(text) = cell else {
                return Err(ExperimentError::Value(
                    "Each item in the sub-arrays of experimentTable must be a string.".to_string(),
                ));
            };
            row.push(text.clone());
        }
        rows.push(row);
    }
    Ok(Table::from_rows(rows))
}
