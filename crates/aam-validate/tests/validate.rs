//! Integration tests for the submission gates.

use aam_model::{AnalysisMode, ExperimentError, Selection, Table};
use aam_validate::{
    parse_alpha, validate_alpha, validate_analysis_mode, validate_experiment_table,
    validate_submission,
};

fn table(rows: &[&[&str]]) -> Table {
    Table::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    )
}

fn sample() -> Table {
    table(&[&["", "b1", "b2"], &["a1", "1.0", "2.0"], &["a2", "3.0", "4.0"]])
}

#[test]
fn pairwise_selection_on_sample_table() {
    let table = sample();
    let both = Selection::from_indices([1, 2]);
    assert!(validate_analysis_mode(AnalysisMode::Pairwise, &both, table.row_count()).is_ok());

    let one = Selection::from_indices([1]);
    let error =
        validate_analysis_mode(AnalysisMode::Pairwise, &one, table.row_count()).unwrap_err();
    assert_eq!(
        error,
        ExperimentError::Selection(
            "At least two rows must be selected for pairwise analysis.".to_string()
        )
    );
}

#[test]
fn alpha_text_then_range() {
    let high = parse_alpha("1.5").unwrap();
    assert!(matches!(validate_alpha(high), Err(ExperimentError::Range(_))));

    let usual = parse_alpha("0.05").unwrap();
    assert!(validate_alpha(usual).is_ok());
}

#[test]
fn sample_table_is_valid() {
    assert!(validate_experiment_table(&sample()).is_ok());
}

#[test]
fn duplicate_benchmarks_are_rejected() {
    let error = validate_experiment_table(&table(&[&["", "b1", "b1"], &["a1", "1", "2"]]))
        .unwrap_err();
    assert_eq!(
        error,
        ExperimentError::Naming("Duplicate benchmark identifiers detected.".to_string())
    );
}

#[test]
fn duplicate_algorithms_are_rejected() {
    let error = validate_experiment_table(&table(&[&["", "b1"], &["a1", "1"], &["a1", "2"]]))
        .unwrap_err();
    assert_eq!(error.to_string(), "Duplicate algorithm identifiers detected.");
}

#[test]
fn first_violation_wins() {
    // duplicate header and a non-numeric cell: only the header is reported
    let error = validate_experiment_table(&table(&[
        &["", "b1", "b1"],
        &["a1", "oops", "2"],
    ]))
    .unwrap_err();
    assert_eq!(error.to_string(), "Duplicate benchmark identifiers detected.");
}

#[test]
fn shape_checks_come_first() {
    assert_eq!(
        validate_experiment_table(&Table::from_rows(vec![]))
            .unwrap_err()
            .to_string(),
        "Table is empty"
    );
    assert_eq!(
        validate_experiment_table(&table(&[&[""], &["a1"]]))
            .unwrap_err()
            .to_string(),
        "There should be at least one benchmark function."
    );
    assert_eq!(
        validate_experiment_table(&table(&[&["", "b1"]]))
            .unwrap_err()
            .to_string(),
        "There should be at least one algorithm."
    );
    let ragged = validate_experiment_table(&table(&[&["", "b1", "b2"], &["a1", "1"]]))
        .unwrap_err();
    assert!(matches!(ragged, ExperimentError::Structural(_)));
    assert_eq!(ragged.to_string(), "Row 1 has 2 cells, expected 3.");
}

#[test]
fn corner_must_be_empty() {
    let error = validate_experiment_table(&table(&[&["x", "b1"], &["a1", "1"]])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "First cell of first row must be empty. Value found: x."
    );
}

#[test]
fn invalid_identifier_names_the_cell() {
    let error = validate_experiment_table(&table(&[&["", "b 1"], &["a1", "1"]])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Cell [0][1] must be alphanumeric or contain any of these symbols: -, _, *, $, #. Value found: b 1."
    );
    let error = validate_experiment_table(&table(&[&["", "b1"], &["", "1"]])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Cell [1][0] must be alphanumeric or contain any of these symbols: -, _, *, $, #. Cell was empty."
    );
}

#[test]
fn data_cells_are_scanned_row_major() {
    let error = validate_experiment_table(&table(&[
        &["", "b1", "b2"],
        &["a1", "1", "x"],
        &["a2", "y", "2"],
    ]))
    .unwrap_err();
    assert!(matches!(error, ExperimentError::Value(_)));
    assert_eq!(
        error.to_string(),
        "Cell [1][2] must be numeric (scientific notation allowed). Value found: x."
    );
}

#[test]
fn negative_values_fail_validation() {
    let error = validate_experiment_table(&table(&[&["", "b1"], &["a1", "-1.0"]])).unwrap_err();
    assert!(matches!(error, ExperimentError::Value(_)));
}

#[test]
fn submission_gates_run_in_order() {
    let table = sample();
    // bad selection and bad alpha: selection is reported
    let error = validate_submission(AnalysisMode::Control, &Selection::new(), 2.0, &table)
        .unwrap_err();
    assert!(matches!(error, ExperimentError::Selection(_)));

    let error = validate_submission(
        AnalysisMode::Control,
        &Selection::from_indices([1]),
        2.0,
        &table,
    )
    .unwrap_err();
    assert!(matches!(error, ExperimentError::Range(_)));

    assert!(
        validate_submission(
            AnalysisMode::All,
            &Selection::from_indices([1, 2]),
            0.05,
            &table
        )
        .is_ok()
    );
}
