//! Subcommand implementations. Each returns the process exit code.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use aam_cli::config::AamConfig;
use aam_client::HttpAnalysisService;
use aam_core::Session;
use aam_report::{csv_file_name, table_to_latex, write_csv_file};

use crate::cli::{ExperimentArgs, ExportArgs, LatexArgs, SearchArgs};
use crate::summary::{
    eprint_session_log, exit_code, print_search_hits, print_session_log,
};

pub fn run_validate(args: &ExperimentArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    if prepare_session(&mut session, args).is_ok() {
        let _ = session.validate();
    }
    print_session_log(session.log());
    Ok(exit_code(session.log()))
}

pub fn run_latex(args: &LatexArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    if session.import_csv_path(&args.csv).is_err() {
        eprint_session_log(session.log());
        return Ok(1);
    }
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| session.experiment_name().to_string());
    println!("{}", table_to_latex(session.table(), &title));
    Ok(0)
}

pub fn run_export(args: &ExportArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    if session.import_csv_path(&args.csv).is_err() {
        print_session_log(session.log());
        return Ok(1);
    }
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(csv_file_name(session.experiment_name())));
    write_csv_file(session.table(), &out)?;
    println!("Output: {}", out.display());
    Ok(0)
}

pub fn run_submit(args: &ExperimentArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    if prepare_session(&mut session, args).is_err() || session.validate().is_err() {
        eprint_session_log(session.log());
        return Ok(1);
    }
    let service = analysis_service(config)?;
    let outcome = session.confirm(&service);
    eprint_session_log(session.log());
    match outcome {
        Ok(result) => {
            let text = serde_json::to_string_pretty(&result).context("render analysis result")?;
            println!("{text}");
            Ok(0)
        }
        Err(_) => Ok(1),
    }
}

pub fn run_commit(args: &ExperimentArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    if prepare_session(&mut session, args).is_ok() {
        let service = analysis_service(config)?;
        let _ = session.commit_experiment(&service);
    }
    print_session_log(session.log());
    Ok(exit_code(session.log()))
}

pub fn run_search(args: &SearchArgs, config: &AamConfig) -> Result<i32> {
    let mut session = Session::new(config.session_settings());
    let service = analysis_service(config)?;
    let outcome = session.search(&service, &args.query);
    print_session_log(session.log());
    match outcome {
        Ok(hits) => {
            print_search_hits(&hits);
            Ok(0)
        }
        Err(_) => Ok(1),
    }
}

fn analysis_service(config: &AamConfig) -> Result<HttpAnalysisService> {
    HttpAnalysisService::new(config.api_endpoint.clone(), config.request_timeout())
        .context("create analysis service client")
}

/// Import the CSV and replay the arguments as the analyser UI would.
fn prepare_session(session: &mut Session, args: &ExperimentArgs) -> aam_model::Result<()> {
    session.import_csv_path(&args.csv)?;
    if let Some(name) = &args.name {
        session.set_experiment_name(name.as_str());
    }
    session.set_experiment_description(args.description.as_str());
    if let Some(optimization) = args.optimization {
        session.set_optimization(optimization.into());
    }
    session.set_mode(args.mode.into());
    for row in &args.rows {
        session.toggle_row(*row, true);
    }
    if let Some(alpha) = &args.alpha {
        session.input_alpha(alpha.as_str(), Instant::now());
        session.flush_alpha()?;
    }
    Ok(())
}
