//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use aam_model::{AnalysisMode, OptimizationMode};

#[derive(Parser)]
#[command(
    name = "aam",
    version,
    about = "Automated analysis of metaheuristics experiments",
    long_about = "Validate experiment tables of algorithm results per benchmark, export them,\n\
                  and submit them to the analysis service for statistical comparison."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Read configuration from this file instead of the platform config dir.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV table and run the submission checks.
    Validate(ExperimentArgs),

    /// Print the table as a LaTeX tabular.
    Latex(LatexArgs),

    /// Re-write an imported table as normalised CSV.
    Export(ExportArgs),

    /// Validate, then request an analysis from the service.
    Submit(ExperimentArgs),

    /// Store the experiment table in the service's database.
    Commit(ExperimentArgs),

    /// Search stored experiments and analyses.
    ///
    /// Prefix the query with [all], [exp] or [als] to choose the scope.
    Search(SearchArgs),
}

#[derive(Args)]
pub struct ExperimentArgs {
    /// CSV file: header row of benchmarks, one row per algorithm.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Statistical comparison to run.
    #[arg(long = "mode", value_enum, default_value = "pairwise")]
    pub mode: AnalysisModeArg,

    /// Algorithm rows to check, in order (1-based, header excluded).
    ///
    /// Applied like clicking row checkboxes: in pairwise mode the last two
    /// win, in control mode the last one.
    #[arg(long = "rows", value_name = "ROWS", value_delimiter = ',')]
    pub rows: Vec<usize>,

    /// Significance level, typed as text.
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<String>,

    /// Whether lower or higher results are better.
    #[arg(long = "optimization", value_enum)]
    pub optimization: Option<OptimizationArg>,

    /// Experiment name (default: CSV file name without extension).
    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(long = "description", default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct LatexArgs {
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Caption row text (default: experiment name).
    #[arg(long = "title")]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Output file (default: <experiment name>.csv in the current directory).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AnalysisModeArg {
    Pairwise,
    Control,
    All,
}

impl From<AnalysisModeArg> for AnalysisMode {
    fn from(value: AnalysisModeArg) -> Self {
        match value {
            AnalysisModeArg::Pairwise => AnalysisMode::Pairwise,
            AnalysisModeArg::Control => AnalysisMode::Control,
            AnalysisModeArg::All => AnalysisMode::All,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OptimizationArg {
    Minimize,
    Maximize,
}

impl From<OptimizationArg> for OptimizationMode {
    fn from(value: OptimizationArg) -> Self {
        match value {
            OptimizationArg::Minimize => OptimizationMode::Minimize,
            OptimizationArg::Maximize => OptimizationMode::Maximize,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
