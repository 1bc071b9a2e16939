//! The experiment session.
//!
//! A [`Session`] owns everything the analyser screen edits: the table, the
//! selected rows, the analysis and optimisation modes, alpha, the experiment
//! name and description, and the user-visible log. Every mutation that can
//! invalidate the selection reconciles it before returning, and any such
//! change after a passed validation withdraws that validation.

use std::path::Path;
use std::time::{Duration, Instant};

use serde_json::Value;

use aam_client::AnalysisService;
use aam_ingest::CsvImport;
use aam_model::{
    AnalysisMode, AnalysisRequest, ExperimentError, ExperimentSubmission, LogClass,
    OptimizationMode, Result, ResultSubmission, SearchHit, SearchQuery, Selection,
    SelectionPolicy, SessionLog, Table, table_from_experiment_payload,
};
use aam_validate::{
    parse_alpha, validate_alpha, validate_analysis_mode, validate_experiment_table,
};

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};

pub const DEFAULT_ALPHA: f64 = 0.05;
pub const DEFAULT_EXPERIMENT_NAME: &str = "unnamed";

const STATE_ALTERED: &str = "State altered. Aborting confirmation of analysis.";
const COMMIT_EXPERIMENT_FAILED: &str = "Failed to commit experiment to the database.";
const COMMIT_RESULT_FAILED: &str = "Failed to commit result to the database.";

/// Starting values for a new session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub default_alpha: f64,
    pub default_experiment_name: String,
    pub optimization_mode: OptimizationMode,
    pub alpha_debounce: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_alpha: DEFAULT_ALPHA,
            default_experiment_name: DEFAULT_EXPERIMENT_NAME.to_string(),
            optimization_mode: OptimizationMode::default(),
            alpha_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    selection: Selection,
    mode: AnalysisMode,
    optimization: OptimizationMode,
    alpha: f64,
    alpha_input: String,
    experiment_name: String,
    experiment_description: String,
    log: SessionLog,
    alpha_debouncer: Debouncer<String>,
    validation_passed: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        let table = Table::initial();
        let mode = AnalysisMode::default();
        let selection = SelectionPolicy::reconcile(mode, &Selection::new(), table.row_count());
        Self {
            table,
            selection,
            mode,
            optimization: settings.optimization_mode,
            alpha: settings.default_alpha,
            alpha_input: settings.default_alpha.to_string(),
            experiment_name: settings.default_experiment_name,
            experiment_description: String::new(),
            log: SessionLog::new(),
            alpha_debouncer: Debouncer::new(settings.alpha_debounce),
            validation_passed: false,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn optimization(&self) -> OptimizationMode {
        self.optimization
    }

    /// Last committed alpha.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Alpha text as currently shown in the input field.
    pub fn alpha_input(&self) -> &str {
        &self.alpha_input
    }

    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    pub fn experiment_description(&self) -> &str {
        &self.experiment_description
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn is_validation_passed(&self) -> bool {
        self.validation_passed
    }

    pub fn set_experiment_name(&mut self, name: impl Into<String>) {
        self.experiment_name = name.into();
    }

    pub fn set_experiment_description(&mut self, description: impl Into<String>) {
        self.experiment_description = description.into();
    }

    // Table editing

    pub fn add_row(&mut self) {
        self.table = self.table.add_row();
        self.state_altered();
    }

    pub fn add_column(&mut self) {
        self.table = self.table.add_column();
        self.state_altered();
    }

    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.table = self.table.remove_row(index)?;
        self.state_altered();
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<()> {
        self.table = self.table.remove_column(index)?;
        self.state_altered();
        Ok(())
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) -> Result<()> {
        self.table = self.table.set_cell(row, column, value)?;
        self.state_altered();
        Ok(())
    }

    /// Swap in a whole new table, e.g. one reopened from the store.
    pub fn replace_table(&mut self, table: Table) {
        self.table = table;
        self.state_altered();
    }

    pub fn reset_table(&mut self) {
        self.table = Table::initial();
        self.log.success("Table reset.");
        self.state_altered();
    }

    // CSV import

    pub fn import_csv_str(&mut self, contents: &str, file_name: &str) -> Result<()> {
        let outcome = aam_ingest::import_csv_str(contents, file_name);
        self.finish_import(file_name, outcome)
    }

    pub fn import_csv_path(&mut self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let outcome = aam_ingest::import_csv_path(path);
        self.finish_import(&file_name, outcome)
    }

    fn finish_import(
        &mut self,
        file_name: &str,
        outcome: aam_ingest::Result<CsvImport>,
    ) -> Result<()> {
        match outcome {
            Ok(import) => {
                self.experiment_name = import.experiment_name;
                self.table = import.table;
                self.log.success(format!("Uploaded {file_name}"));
                self.state_altered();
                Ok(())
            }
            Err(error) => {
                let error = error.into_experiment_error();
                self.log
                    .error(format!("Failed to upload {file_name}: {}", error.message()));
                Err(error)
            }
        }
    }

    /// Reopen a stored experiment (the `experimentData` object of a search hit).
    ///
    /// The table is required; name, description, alpha and optimisation mode
    /// are taken when present and well-typed.
    pub fn load_experiment(&mut self, data: &Value) -> Result<()> {
        let table = match table_from_experiment_payload(data) {
            Ok(table) => table,
            Err(error) => {
                self.log.error(error.message());
                return Err(error);
            }
        };
        if let Some(name) = data.get("experimentName").and_then(Value::as_str) {
            self.experiment_name = name.to_string();
        }
        if let Some(description) = data.get("experimentDescription").and_then(Value::as_str) {
            self.experiment_description = description.to_string();
        }
        if let Some(alpha) = data.get("alpha").and_then(Value::as_f64) {
            self.alpha = alpha;
            self.alpha_input = alpha.to_string();
            self.alpha_debouncer.cancel();
        }
        if let Some(optimization) = data
            .get("optimizationMode")
            .and_then(Value::as_str)
            .and_then(|text| text.parse().ok())
        {
            self.optimization = optimization;
        }
        self.table = table;
        self.log.success("Experiment data loaded.");
        self.state_altered();
        Ok(())
    }

    // Modes and selection

    pub fn set_mode(&mut self, mode: AnalysisMode) {
        let changed = self.mode != mode;
        self.mode = mode;
        self.log.info(format!("{} analysis selected.", mode.label()));
        if changed {
            self.state_altered();
        }
    }

    pub fn set_optimization(&mut self, optimization: OptimizationMode) {
        let changed = self.optimization != optimization;
        self.optimization = optimization;
        self.log
            .info(format!("{} optimization selected.", optimization.label()));
        if changed {
            self.state_altered();
        }
    }

    /// Apply a checkbox change on algorithm row `row`.
    pub fn toggle_row(&mut self, row: usize, checked: bool) {
        if !self.mode.allows_toggle() {
            tracing::debug!(row, mode = self.mode.as_str(), "row toggle ignored");
            return;
        }
        let next = SelectionPolicy::toggle(
            self.mode,
            &self.selection,
            row,
            checked,
            self.table.row_count(),
        );
        if next != self.selection {
            self.selection = next;
            self.state_altered();
        }
    }

    pub fn log_selected_rows(&mut self) {
        let rows = self
            .selection
            .indices()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.log.info(format!("Selected rows: {rows}"));
    }

    /// Reconcile the selection and withdraw a passed validation.
    fn state_altered(&mut self) {
        if SelectionPolicy::reconcile_in_place(
            self.mode,
            &mut self.selection,
            self.table.row_count(),
        ) {
            tracing::debug!(
                mode = self.mode.as_str(),
                selection = ?self.selection.indices(),
                "selection reconciled"
            );
        }
        if self.validation_passed {
            self.validation_passed = false;
            self.log.warning(STATE_ALTERED);
        }
    }

    // Alpha entry

    /// Record typed alpha text and (re)start the commit timer.
    pub fn input_alpha(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.alpha_input.clone_from(&text);
        self.alpha_debouncer.start(text, now);
    }

    /// Commit the typed alpha once it has settled. Returns whether a commit
    /// was attempted.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.alpha_debouncer.poll(now) {
            Some(text) => {
                // rejection is already in the session log
                let _ = self.commit_alpha(&text);
                true
            }
            None => false,
        }
    }

    /// Commit any pending alpha text without waiting.
    ///
    /// `Ok(false)` when nothing was pending. Rejected text is logged and
    /// returned as the error.
    pub fn flush_alpha(&mut self) -> Result<bool> {
        match self.alpha_debouncer.flush() {
            Some(text) => self.commit_alpha(&text).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn cancel_alpha_input(&mut self) {
        if self.alpha_debouncer.cancel() {
            self.alpha_input = self.alpha.to_string();
        }
    }

    fn commit_alpha(&mut self, text: &str) -> Result<()> {
        match parse_alpha(text) {
            Ok(alpha) => {
                tracing::debug!(alpha, "alpha committed");
                let changed = self.alpha != alpha;
                self.alpha = alpha;
                if changed {
                    self.state_altered();
                }
                Ok(())
            }
            Err(error) => {
                self.alpha_input = self.alpha.to_string();
                self.log.error(error.message());
                Err(error)
            }
        }
    }

    // Validation and submission

    /// Run the submission gates against the current state.
    ///
    /// The log is cleared first so it only shows this run.
    pub fn validate(&mut self) -> Result<()> {
        self.log.clear();
        self.log.info("Analysis validation initiated.");
        let outcome = self.run_gates();
        match &outcome {
            Ok(()) => {
                self.validation_passed = true;
                self.log
                    .success("Validation phase passed. Confirm analysis procedure.");
            }
            Err(_) => {
                self.validation_passed = false;
                self.log.error("Validation failed. Aborting analysis.");
            }
        }
        outcome
    }

    fn run_gates(&mut self) -> Result<()> {
        let _span = tracing::info_span!("validate", mode = self.mode.as_str()).entered();
        let outcome = validate_analysis_mode(self.mode, &self.selection, self.table.row_count());
        self.gate(
            outcome,
            "Analysis mode validated.",
            "Analysis mode validation failed.",
        )?;
        let outcome = validate_alpha(self.alpha);
        self.gate(outcome, "Alpha validated.", "Alpha validation failed.")?;
        let outcome = validate_experiment_table(&self.table);
        self.gate(outcome, "Table successfully validated.", "Validation failed.")
    }

    /// Log one gate's outcome. A failure logs the cause at its own class,
    /// then the gate summary as an error.
    fn gate(&mut self, outcome: Result<()>, success: &str, failure: &str) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.log.success(success);
                Ok(())
            }
            Err(error) => {
                self.log.push(error.message(), error.log_class());
                self.log.error(failure);
                Err(error)
            }
        }
    }

    /// The request the current state would send.
    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            alpha: self.alpha,
            experiment_name: self.experiment_name.clone(),
            analysis_type: self.mode,
            experiment_data: self.table.clone(),
            selected_rows: self.selection.clone(),
            optimization_mode: self.optimization,
            experiment_description: self.experiment_description.clone(),
        }
    }

    /// Send a validated experiment for analysis and return the result data.
    ///
    /// Confirming without a passed validation is a caller error; the
    /// analyser only offers confirmation after [`Session::validate`].
    pub fn confirm(&mut self, service: &dyn AnalysisService) -> Result<Value> {
        if !self.validation_passed {
            return Err(ExperimentError::Unreachable(
                "Analysis must be validated before it can be confirmed.".to_string(),
            ));
        }
        let request = self.analysis_request();
        let _span = tracing::info_span!("confirm", endpoint = request.endpoint()).entered();
        match service.request_analysis(&request) {
            Ok(response) => {
                if let Some(message) = response.message {
                    self.log.success(message);
                }
                Ok(response.result)
            }
            Err(error) => {
                self.log.error(error.message());
                self.log.error("Analysis failed. Please try again.");
                self.validation_passed = false;
                Err(error)
            }
        }
    }

    pub fn cancel_confirmation(&mut self) {
        self.validation_passed = false;
        self.log.warning("Analysis cancelled.");
    }

    /// Store the current table under the experiment name.
    pub fn commit_experiment(&mut self, service: &dyn AnalysisService) -> Result<Value> {
        if self.experiment_name.trim().is_empty() {
            let error = ExperimentError::Naming("Experiment name cannot be empty.".to_string());
            self.log.error(error.message());
            self.log.error(COMMIT_EXPERIMENT_FAILED);
            return Err(error);
        }
        if let Err(error) = validate_experiment_table(&self.table) {
            self.log.push(error.message(), error.log_class());
            self.log.error(COMMIT_EXPERIMENT_FAILED);
            return Err(error);
        }
        let submission = ExperimentSubmission::new(
            self.experiment_name.clone(),
            self.table.clone(),
            self.optimization,
            self.alpha,
            self.experiment_description.clone(),
        );
        match service.submit_experiment(&submission) {
            Ok(response) => {
                self.log.success("Experiment committed to the database.");
                Ok(response)
            }
            Err(error) => {
                self.log.error(error.message());
                self.log.error(COMMIT_EXPERIMENT_FAILED);
                Err(error)
            }
        }
    }

    /// Store an analysis result next to this experiment.
    ///
    /// The analysis type recorded is the one carried by the result itself,
    /// falling back to the session's mode.
    pub fn commit_result(
        &mut self,
        service: &dyn AnalysisService,
        analysis_name: &str,
        analysis_notes: &str,
        analysis_result: Value,
    ) -> Result<Value> {
        if analysis_name.trim().is_empty() {
            let error = ExperimentError::Naming("Analysis name cannot be empty.".to_string());
            self.log.error(error.message());
            self.log.error(COMMIT_RESULT_FAILED);
            return Err(error);
        }
        let analysis_type = analysis_result
            .get("analysisType")
            .and_then(Value::as_str)
            .and_then(|text| text.parse().ok())
            .unwrap_or(self.mode);
        let submission = ResultSubmission {
            analysis_name: analysis_name.to_string(),
            experiment_name: self.experiment_name.clone(),
            analysis_result,
            analysis_type,
            analysis_notes: analysis_notes.to_string(),
            experiment_description: self.experiment_description.clone(),
        };
        match service.submit_result(&submission) {
            Ok(response) => {
                self.log.success("Result committed to the database.");
                Ok(response)
            }
            Err(error) => {
                self.log.error(error.message());
                self.log.error(COMMIT_RESULT_FAILED);
                Err(error)
            }
        }
    }

    /// Search the store with free text, optionally scoped by a leading tag.
    pub fn search(
        &mut self,
        service: &dyn AnalysisService,
        input: &str,
    ) -> Result<Vec<SearchHit>> {
        let query = match SearchQuery::parse(input) {
            Ok(query) => query,
            Err(error) => {
                self.log.error(error.message());
                return Err(error);
            }
        };
        self.log.info(format!(
            "Searching for: {} in {}",
            query.search_string, query.search_type
        ));
        match service.search(&query) {
            Ok(response) => {
                let hits = response.into_hits();
                self.log.success("Search completed successfully.");
                if hits.is_empty() {
                    self.log.info("No search results to display.");
                }
                Ok(hits)
            }
            Err(error) => {
                self.log.push(
                    format!("Error during search: {}", error.message()),
                    LogClass::Error,
                );
                Err(error)
            }
        }
    }
}
