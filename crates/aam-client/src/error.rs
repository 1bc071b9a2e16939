//! Transport errors.

use thiserror::Error;

use aam_model::ExperimentError;

/// Shown when the service gives no usable reason for a failure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} returned {status}: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))]
    Status {
        url: String,
        status: u16,
        /// The `error` field of the response body, if there was one.
        message: Option<String>,
    },

    /// A success response whose body did not decode.
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Message suitable for the session log.
    ///
    /// Only the service's own explanation is passed through; everything else
    /// collapses to a generic message.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message,
            _ => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

impl From<ClientError> for ExperimentError {
    fn from(error: ClientError) -> Self {
        ExperimentError::Transport(error.user_message().to_string())
    }
}
