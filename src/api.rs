//! Rendering service client.
//!
//! DESIGN
//! ======
//! The service exposes three JSON endpoints: template listing, job
//! submission and job status. `RenderService` is the seam the rest of the
//! binary talks to; `HttpRenderService` is the `reqwest` implementation and
//! tests substitute scripted mocks.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and undecodable bodies are distinct
//! `ApiError` variants. Callers decide what is fatal: a failed submission
//! ends the job, a failed status query is retried on the next tick.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use canvas::session::Template;
use canvas::submission::SubmissionPayload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by rendering service calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body not read.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success HTTP status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Whether retrying the same call later could succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Opaque identifier of a rendering job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Job status as reported by `GET /memes/{task_id}`, in the service's capitalized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Done,
    Failed,
    /// Any other value; treated as still pending.
    #[serde(other)]
    Unknown,
}

/// Body of `GET /memes/{task_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
    /// Result image location; meaningful only when `status` is `Done`.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: TaskId,
}

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// Async interface to the rendering service. Enables mocking in tests.
#[async_trait::async_trait]
pub trait RenderService: Send + Sync {
    /// `GET /templates`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the service is unreachable, answers with a
    /// non-success status or sends an unreadable body.
    async fn templates(&self) -> Result<Vec<Template>, ApiError>;

    /// `POST /memes`, returning the new job's id.
    ///
    /// # Errors
    ///
    /// As for [`RenderService::templates`].
    async fn submit(&self, payload: &SubmissionPayload) -> Result<TaskId, ApiError>;

    /// `GET /memes/{task_id}`.
    ///
    /// # Errors
    ///
    /// As for [`RenderService::templates`].
    async fn job_status(&self, task_id: &TaskId) -> Result<JobStatusResponse, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed [`RenderService`].
pub struct HttpRenderService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRenderService {
    /// Build a client for `config.base_url` with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl RenderService for HttpRenderService {
    async fn templates(&self) -> Result<Vec<Template>, ApiError> {
        let response = self
            .http
            .get(self.url("/templates"))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(response).await
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<TaskId, ApiError> {
        debug!(template_id = %payload.template_id, lines = payload.text_lines.len(), "submitting render job");
        let response = self
            .http
            .post(self.url("/memes"))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let body: SubmitResponse = read_json(response).await?;
        Ok(body.task_id)
    }

    async fn job_status(&self, task_id: &TaskId) -> Result<JobStatusResponse, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/memes/{task_id}")))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}
