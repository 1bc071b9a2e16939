//! Blocking HTTP implementation of [`AnalysisService`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use aam_model::{
    AnalysisRequest, AnalysisResponse, ExperimentSubmission, Result, ResultSubmission,
    SearchQuery, SearchResponse,
};

use crate::error::ClientError;
use crate::service::AnalysisService;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts JSON payloads to `<base_url>/<resource>`.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: Client,
    base_url: String,
}

impl HttpAnalysisService {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    /// POST `body` to `resource`. Every failure is logged with its full
    /// cause; callers only pass on [`ClientError::user_message`].
    fn post<B, T>(&self, resource: &str, body: &B) -> std::result::Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource);
        debug!(%url, "posting to analysis service");
        let outcome = self.send(url, body);
        if let Err(error) = &outcome {
            warn!(%error, "analysis service request failed");
        }
        outcome
    }

    fn send<B, T>(&self, url: String, body: &B) -> std::result::Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, concat!("aam/", env!("CARGO_PKG_VERSION")))
            .json(body)
            .send()
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                message: error_message_from_body(&body),
            });
        }

        response
            .json()
            .map_err(|source| ClientError::Decode { url, source })
    }
}

/// The `error` string of a JSON error body, if present.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl AnalysisService for HttpAnalysisService {
    fn request_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        Ok(self.post(request.endpoint(), request)?)
    }

    fn submit_experiment(&self, submission: &ExperimentSubmission) -> Result<Value> {
        Ok(self.post(ExperimentSubmission::ENDPOINT, submission)?)
    }

    fn submit_result(&self, submission: &ResultSubmission) -> Result<Value> {
        Ok(self.post(ResultSubmission::ENDPOINT, submission)?)
    }

    fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        Ok(self.post(SearchQuery::ENDPOINT, query)?)
    }
}
