//! Error kinds surfaced to the user while building and submitting an experiment.
//!
//! Each variant carries the user-facing message verbatim so the session log can
//! show it unchanged.

use thiserror::Error;

use crate::log::LogClass;

/// Errors raised by the table model, the validator, the importer and the
/// transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExperimentError {
    /// Non-rectangular, empty or undersized table.
    #[error("{0}")]
    Structural(String),

    /// Duplicate or invalid benchmark/algorithm identifier.
    #[error("{0}")]
    Naming(String),

    /// Non-numeric data cell or malformed user input.
    #[error("{0}")]
    Value(String),

    /// Selection cardinality does not match the analysis mode.
    #[error("{0}")]
    Selection(String),

    /// Significance level out of bounds.
    #[error("{0}")]
    Range(String),

    /// Failure reported by (or while reaching) the analysis service.
    #[error("{0}")]
    Transport(String),

    /// A tag that matches no known case.
    #[error("{0}")]
    Unreachable(String),
}

impl ExperimentError {
    /// Short name of the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structural(_) => "structural",
            Self::Naming(_) => "naming",
            Self::Value(_) => "value",
            Self::Selection(_) => "selection",
            Self::Range(_) => "range",
            Self::Transport(_) => "transport",
            Self::Unreachable(_) => "unreachable",
        }
    }

    /// The message shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Structural(message)
            | Self::Naming(message)
            | Self::Value(message)
            | Self::Selection(message)
            | Self::Range(message)
            | Self::Transport(message)
            | Self::Unreachable(message) => message,
        }
    }

    /// Severity used when the error lands in the session log.
    ///
    /// Validation failures are warnings the user can fix in place; transport
    /// and internal failures are errors.
    pub fn log_class(&self) -> LogClass {
        match self {
            Self::Structural(_)
            | Self::Naming(_)
            | Self::Value(_)
            | Self::Selection(_)
            | Self::Range(_) => LogClass::Warning,
            Self::Transport(_) | Self::Unreachable(_) => LogClass::Error,
        }
    }
}

/// Precondition violations of the structural table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Row 0 holds the benchmark identifiers and cannot be removed.
    #[error("the header row cannot be removed")]
    ProtectedHeaderRow,

    /// Column 0 holds the algorithm identifiers and cannot be removed.
    #[error("the header column cannot be removed")]
    ProtectedHeaderColumn,

    #[error("row index {index} is out of range (table has {rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("column index {index} is out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
}

impl From<TableError> for ExperimentError {
    fn from(error: TableError) -> Self {
        ExperimentError::Structural(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
