use std::cell::RefCell;
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use aam_client::AnalysisService;
use aam_core::{Session, SessionSettings};
use aam_model::{
    AnalysisMode, AnalysisRequest, AnalysisResponse, ExperimentError, ExperimentSubmission,
    HitKind, LogClass, OptimizationMode, Result, ResultSubmission, SearchQuery, SearchResponse,
    SearchType,
};

const SAMPLE_CSV: &str = "name,b1,b2\na1,1.0,2.0\na2,3.0,4.0\n,,\n";

/// Records every call and answers from canned values.
#[derive(Default)]
struct FakeService {
    failure: Option<String>,
    search_response: SearchResponse,
    analyses: RefCell<Vec<AnalysisRequest>>,
    experiments: RefCell<Vec<ExperimentSubmission>>,
    results: RefCell<Vec<ResultSubmission>>,
    searches: RefCell<Vec<SearchQuery>>,
}

impl FakeService {
    fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn outcome<T>(&self, value: T) -> Result<T> {
        match &self.failure {
            Some(message) => Err(ExperimentError::Transport(message.clone())),
            None => Ok(value),
        }
    }
}

impl AnalysisService for FakeService {
    fn request_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        self.analyses.borrow_mut().push(request.clone());
        self.outcome(AnalysisResponse {
            message: None,
            result: json!({ "analysisType": request.analysis_type, "ranks": [1, 2] }),
        })
    }

    fn submit_experiment(&self, submission: &ExperimentSubmission) -> Result<Value> {
        self.experiments.borrow_mut().push(submission.clone());
        self.outcome(json!({ "message": "stored" }))
    }

    fn submit_result(&self, submission: &ResultSubmission) -> Result<Value> {
        self.results.borrow_mut().push(submission.clone());
        self.outcome(json!({ "message": "stored" }))
    }

    fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.searches.borrow_mut().push(query.clone());
        self.outcome(self.search_response.clone())
    }
}

fn messages(session: &Session) -> Vec<&str> {
    session
        .log()
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect()
}

fn imported_session() -> Session {
    let mut session = Session::default();
    session
        .import_csv_str(SAMPLE_CSV, "cec2017.csv")
        .expect("import sample");
    session
}

#[test]
fn import_replaces_table_and_names_experiment() {
    let session = imported_session();
    assert_eq!(session.table().row_count(), 3);
    assert_eq!(session.table().cell(0, 0), Some(""));
    assert_eq!(session.experiment_name(), "cec2017");
    assert_eq!(session.selection().indices(), &[1]);
    assert_eq!(messages(&session), vec!["Uploaded cec2017.csv"]);
}

#[test]
fn failed_import_keeps_previous_table() {
    let mut session = Session::default();
    let error = session
        .import_csv_str(",b1,b2\na1,1\n", "ragged.csv")
        .unwrap_err();
    assert!(matches!(error, ExperimentError::Structural(_)));
    assert_eq!(session.table().row_count(), 2);
    assert_eq!(session.experiment_name(), "unnamed");
    let last = session.log().last().expect("log entry");
    assert_eq!(last.class, LogClass::Error);
    assert_eq!(
        last.message,
        "Failed to upload ragged.csv: CSV file does not have a consistent number of columns."
    );
}

#[test]
fn import_from_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sphere.CSV");
    std::fs::write(&path, SAMPLE_CSV).expect("write csv");
    let mut session = Session::default();
    session.import_csv_path(&path).expect("import path");
    assert_eq!(session.experiment_name(), "sphere");
}

#[test]
fn pairwise_selection_slides_and_validates() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    assert_eq!(session.selection().indices(), &[1, 2]);

    session.validate().expect("validation passes");
    assert!(session.is_validation_passed());
    assert_eq!(
        messages(&session),
        vec![
            "Analysis validation initiated.",
            "Analysis mode validated.",
            "Alpha validated.",
            "Table successfully validated.",
            "Validation phase passed. Confirm analysis procedure.",
        ]
    );
}

#[test]
fn validation_clears_log_and_reports_first_failure() {
    let mut session = imported_session();
    let error = session.validate().unwrap_err();
    assert_eq!(
        error.to_string(),
        "At least two rows must be selected for pairwise analysis."
    );
    assert!(!session.is_validation_passed());
    let entries = session.log().entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].message, "Analysis validation initiated.");
    assert_eq!(entries[1].class, LogClass::Warning);
    assert_eq!(entries[2].message, "Analysis mode validation failed.");
    assert_eq!(entries[2].class, LogClass::Error);
    assert_eq!(entries[3].message, "Validation failed. Aborting analysis.");
    assert_eq!(entries[3].class, LogClass::Error);
}

#[test]
fn failing_table_gate_logs_gate_summary() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.set_cell(2, 1, "fast").expect("set cell");
    assert!(session.validate().is_err());
    let logged = messages(&session);
    assert_eq!(
        logged[logged.len() - 2..],
        ["Validation failed.", "Validation failed. Aborting analysis."]
    );
}

#[test]
fn control_mode_picks_one_row() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.set_mode(AnalysisMode::Control);
    assert_eq!(session.selection().indices(), &[1]);
    session.toggle_row(2, true);
    assert_eq!(session.selection().indices(), &[2]);
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Control (1vN) analysis selected.")
    );
}

#[test]
fn all_mode_selects_every_row_and_ignores_toggles() {
    let mut session = imported_session();
    session.set_mode(AnalysisMode::All);
    assert_eq!(session.selection().indices(), &[1, 2]);
    session.toggle_row(1, false);
    assert_eq!(session.selection().indices(), &[1, 2]);
    session.add_row();
    assert_eq!(session.selection().indices(), &[1, 2, 3]);
}

#[test]
fn state_change_withdraws_passed_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");

    session.set_optimization(OptimizationMode::Maximize);
    assert!(!session.is_validation_passed());
    let entries = session.log().entries();
    assert_eq!(entries[entries.len() - 2].message, "Maximize optimization selected.");
    assert_eq!(
        entries[entries.len() - 1].message,
        "State altered. Aborting confirmation of analysis."
    );
    let logged = session.log().len();

    // only one warning until the next successful validation
    session.add_column();
    assert_eq!(session.log().len(), logged);
}

#[test]
fn committed_alpha_withdraws_passed_validation() {
    let service = FakeService::default();
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");

    session.input_alpha("5", Instant::now());
    assert_eq!(session.flush_alpha(), Ok(true));
    assert_eq!(session.alpha(), 5.0);
    assert!(!session.is_validation_passed());
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("State altered. Aborting confirmation of analysis.")
    );
    assert!(matches!(
        session.confirm(&service),
        Err(ExperimentError::Unreachable(_))
    ));
    assert!(service.analyses.borrow().is_empty());

    assert_eq!(
        session.validate(),
        Err(ExperimentError::Range("Alpha must be between 0 and 1.".to_string()))
    );
}

#[test]
fn debounced_alpha_commit_withdraws_passed_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    let t0 = Instant::now();
    session.input_alpha("0.1", t0);
    assert!(session.poll(t0 + Duration::from_secs(1)));
    assert!(!session.is_validation_passed());
}

#[test]
fn unchanged_alpha_keeps_passed_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    session.input_alpha("0.05", Instant::now());
    assert_eq!(session.flush_alpha(), Ok(true));
    assert!(session.is_validation_passed());
}

#[test]
fn rejected_alpha_keeps_passed_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    session.input_alpha("abc", Instant::now());
    assert!(session.flush_alpha().is_err());
    assert!(session.is_validation_passed());
    assert_eq!(session.alpha(), 0.05);
}

#[test]
fn loading_experiment_withdraws_passed_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    session
        .load_experiment(&json!({
            "experimentTable": [["", "f1"], ["pso", "1"], ["de", "3"]],
            "alpha": 0.01
        }))
        .expect("load experiment");
    assert!(!session.is_validation_passed());
    let logged = messages(&session);
    assert_eq!(
        logged[logged.len() - 2..],
        ["Experiment data loaded.", "State altered. Aborting confirmation of analysis."]
    );
}

#[test]
fn reselecting_current_mode_keeps_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    session.set_mode(AnalysisMode::Pairwise);
    assert!(session.is_validation_passed());
}

#[test]
fn reset_restores_initial_table() {
    let mut session = imported_session();
    session.set_cell(1, 1, "9.9").expect("set cell");
    session.reset_table();
    assert_eq!(session.table().row_count(), 2);
    assert_eq!(session.table().column_count(), 2);
    assert_eq!(session.selection().indices(), &[1]);
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Table reset.")
    );
}

#[test]
fn alpha_commits_after_quiescence() {
    let mut session = Session::new(SessionSettings {
        alpha_debounce: Duration::from_millis(500),
        ..SessionSettings::default()
    });
    let t0 = Instant::now();
    session.input_alpha("0.", t0);
    session.input_alpha("0.1", t0 + Duration::from_millis(200));
    assert_eq!(session.alpha_input(), "0.1");
    assert!(!session.poll(t0 + Duration::from_millis(600)));
    assert_eq!(session.alpha(), 0.05);
    assert!(session.poll(t0 + Duration::from_millis(700)));
    assert_eq!(session.alpha(), 0.1);
    assert!(session.log().is_empty());
}

#[test]
fn invalid_alpha_text_restores_committed_value() {
    let mut session = Session::default();
    let t0 = Instant::now();
    session.input_alpha("abc", t0);
    assert!(session.poll(t0 + Duration::from_secs(1)));
    assert_eq!(session.alpha(), 0.05);
    assert_eq!(session.alpha_input(), "0.05");
    let last = session.log().last().expect("log entry");
    assert_eq!(last.message, "Alpha must be a numeric value.");
    assert_eq!(last.class, LogClass::Error);
}

#[test]
fn flushing_rejected_alpha_reports_error() {
    let mut session = Session::default();
    assert_eq!(session.flush_alpha(), Ok(false));
    session.input_alpha("-0.1", Instant::now());
    assert_eq!(
        session.flush_alpha(),
        Err(ExperimentError::Value("Alpha must be a numeric value.".to_string()))
    );
    assert_eq!(session.alpha_input(), "0.05");
}

#[test]
fn cancelled_alpha_input_never_commits() {
    let mut session = Session::default();
    let t0 = Instant::now();
    session.input_alpha("0.2", t0);
    session.cancel_alpha_input();
    assert_eq!(session.alpha_input(), "0.05");
    assert!(!session.poll(t0 + Duration::from_secs(1)));
    assert_eq!(session.alpha(), 0.05);
}

#[test]
fn out_of_range_alpha_fails_validation() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.input_alpha("1.5", Instant::now());
    assert_eq!(session.flush_alpha(), Ok(true));
    let error = session.validate().unwrap_err();
    assert_eq!(error, ExperimentError::Range("Alpha must be between 0 and 1.".to_string()));
}

#[test]
fn confirm_sends_current_state() {
    let service = FakeService::default();
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.set_experiment_description("two solvers");
    session.validate().expect("validation passes");

    let result = session.confirm(&service).expect("analysis succeeds");
    assert_eq!(result["ranks"], json!([1, 2]));

    let requests = service.analyses.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint(), "api/analysis/pairwise");
    assert_eq!(requests[0].selected_rows.indices(), &[1, 2]);
    assert_eq!(requests[0].experiment_name, "cec2017");
    assert_eq!(requests[0].experiment_description, "two solvers");
}

#[test]
fn confirm_requires_passed_validation() {
    let service = FakeService::default();
    let mut session = imported_session();
    assert!(matches!(
        session.confirm(&service),
        Err(ExperimentError::Unreachable(_))
    ));
    assert!(service.analyses.borrow().is_empty());
}

#[test]
fn failed_confirm_is_logged_and_withdraws_validation() {
    let service = FakeService::failing("Analysis type not supported.");
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");

    let error = session.confirm(&service).unwrap_err();
    assert_eq!(error.log_class(), LogClass::Error);
    assert!(!session.is_validation_passed());
    let entries = session.log().entries();
    assert_eq!(entries[entries.len() - 2].message, "Analysis type not supported.");
    assert_eq!(
        entries[entries.len() - 1].message,
        "Analysis failed. Please try again."
    );
}

#[test]
fn cancel_confirmation_logs_warning() {
    let mut session = imported_session();
    session.toggle_row(2, true);
    session.validate().expect("validation passes");
    session.cancel_confirmation();
    assert!(!session.is_validation_passed());
    assert_eq!(
        session.log().last().map(|entry| entry.class),
        Some(LogClass::Warning)
    );
}

#[test]
fn commit_experiment_requires_name() {
    let service = FakeService::default();
    let mut session = imported_session();
    session.set_experiment_name("   ");
    let error = session.commit_experiment(&service).unwrap_err();
    assert_eq!(error.to_string(), "Experiment name cannot be empty.");
    assert!(service.experiments.borrow().is_empty());
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Failed to commit experiment to the database.")
    );
}

#[test]
fn commit_experiment_requires_valid_table() {
    let service = FakeService::default();
    let mut session = imported_session();
    session.set_cell(1, 1, "fast").expect("set cell");
    let error = session.commit_experiment(&service).unwrap_err();
    assert!(matches!(error, ExperimentError::Value(_)));
    assert!(service.experiments.borrow().is_empty());
}

#[test]
fn commit_experiment_posts_submission() {
    let service = FakeService::default();
    let mut session = imported_session();
    session.set_optimization(OptimizationMode::Maximize);
    session.commit_experiment(&service).expect("commit succeeds");
    let submissions = service.experiments.borrow();
    assert_eq!(submissions[0].experiment_name, "cec2017");
    assert_eq!(
        submissions[0].experiment_data.optimization_mode,
        OptimizationMode::Maximize
    );
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Experiment committed to the database.")
    );
}

#[test]
fn commit_result_uses_result_analysis_type() {
    let service = FakeService::default();
    let mut session = imported_session();
    let result = json!({ "analysisType": "control", "ranks": [] });
    session
        .commit_result(&service, "control-run", "notes", result)
        .expect("commit succeeds");
    let submissions = service.results.borrow();
    assert_eq!(submissions[0].analysis_type, AnalysisMode::Control);
    assert_eq!(submissions[0].analysis_notes, "notes");

    let error = session
        .commit_result(&service, "", "", json!({}))
        .unwrap_err();
    assert_eq!(error.to_string(), "Analysis name cannot be empty.");
}

#[test]
fn search_flattens_hits_and_logs() {
    let service = FakeService {
        search_response: SearchResponse {
            experiments: Some(vec![json!({
                "experiment_id": 4,
                "experiment_name": "cec2017",
                "experiment_data": { "experimentTable": [["", "b1"], ["a1", "1"]] },
                "experiment_description": "stored"
            })]),
            analyses: None,
        },
        ..FakeService::default()
    };
    let mut session = Session::default();
    let hits = session.search(&service, "[exp] cec").expect("search succeeds");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, HitKind::Experiment);
    assert_eq!(service.searches.borrow()[0].search_type, SearchType::Experiments);
    assert_eq!(
        messages(&session),
        vec!["Searching for: cec in experiments", "Search completed successfully."]
    );

    session
        .load_experiment(&hits[0].data["experimentData"])
        .expect("load hit");
    assert_eq!(session.table().cell(1, 0), Some("a1"));
    assert_eq!(session.experiment_description(), "stored");
}

#[test]
fn empty_search_is_rejected_without_request() {
    let service = FakeService::default();
    let mut session = Session::default();
    assert!(session.search(&service, "  ").is_err());
    assert!(service.searches.borrow().is_empty());
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Search query cannot be empty.")
    );
}

#[test]
fn search_failure_is_prefixed() {
    let service = FakeService::failing("An unknown error occurred.");
    let mut session = Session::default();
    assert!(session.search(&service, "sphere").is_err());
    assert_eq!(
        session.log().last().map(|entry| entry.message.as_str()),
        Some("Error during search: An unknown error occurred.")
    );
}

#[test]
fn load_experiment_applies_stored_settings() {
    let mut session = Session::default();
    session
        .load_experiment(&json!({
            "experimentName": "stored-run",
            "experimentTable": [["", "f1", "f2"], ["pso", "1", "2"], ["de", "3", "4"]],
            "optimizationMode": "maximize",
            "alpha": 0.01
        }))
        .expect("load experiment");
    assert_eq!(session.experiment_name(), "stored-run");
    assert_eq!(session.optimization(), OptimizationMode::Maximize);
    assert_eq!(session.alpha(), 0.01);
    assert_eq!(session.alpha_input(), "0.01");
    assert_eq!(session.table().row_count(), 3);

    let error = session
        .load_experiment(&json!({ "experimentTable": [["", 1]] }))
        .unwrap_err();
    assert!(matches!(error, ExperimentError::Value(_)));
    assert_eq!(session.table().row_count(), 3);
}
