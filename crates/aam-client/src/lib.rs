//! Client side of the analysis service.
//!
//! [`AnalysisService`] is the seam the session talks to; [`HttpAnalysisService`]
//! is the blocking HTTP implementation used by the CLI.

pub mod error;
pub mod http;
pub mod service;

pub use error::{ClientError, UNKNOWN_ERROR_MESSAGE};
pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpAnalysisService, error_message_from_body};
pub use service::AnalysisService;
