use serde_json::Value;

use aam_model::{
    AnalysisRequest, AnalysisResponse, ExperimentSubmission, Result, ResultSubmission,
    SearchQuery, SearchResponse,
};

/// Operations offered by the analysis service.
///
/// Failures are reported as [`aam_model::ExperimentError::Transport`] with a
/// message fit for the session log.
pub trait AnalysisService {
    /// Run a statistical analysis on a validated experiment.
    fn request_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;

    /// Store an experiment table.
    fn submit_experiment(&self, submission: &ExperimentSubmission) -> Result<Value>;

    /// Store an analysis result.
    fn submit_result(&self, submission: &ResultSubmission) -> Result<Value>;

    fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}
