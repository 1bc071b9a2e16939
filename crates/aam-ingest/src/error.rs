use std::path::PathBuf;

use aam_model::ExperimentError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Experiment(#[from] ExperimentError),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// View the failure as one of the user-facing error kinds.
    pub fn into_experiment_error(self) -> ExperimentError {
        match self {
            IngestError::Experiment(error) => error,
            other => ExperimentError::Structural(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
