//! HTTP Backend Implementation
//!
//! Backend for the summarization service's JSON-over-HTTP API.
//!
//! # Service API
//!
//! - `GET /health` - Service status, model readiness and device
//! - `GET /emotions` - Supported emotion labels
//! - `POST /summarize` - Detect emotion and summarize text
//!
//! Non-2xx responses carry `{"detail": "..."}`; that message is surfaced
//! verbatim when present.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::traits::{
    BackendConfig, BackendError, EmotionList, ErrorBody, HealthReport, SummarizeBody,
    SummarizerBackend, SummaryResult,
};
use crate::submission::SubmissionRequest;

/// HTTP backend client
#[derive(Clone)]
pub struct HttpBackend {
    /// Endpoint configuration
    config: BackendConfig,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(BackendConfig::new(base_url))
    }

    /// Create from `BackendConfig`
    #[must_use]
    pub fn from_config(config: BackendConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
        }
    }

    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(BackendConfig::from_env())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn health_url(&self) -> String {
        self.config.endpoint("/health")
    }

    fn emotions_url(&self) -> String {
        self.config.endpoint("/emotions")
    }

    fn summarize_url(&self) -> String {
        self.config.endpoint("/summarize")
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::from_config(BackendConfig::default())
    }
}

/// Decode a response body, mapping non-2xx statuses to `BackendError::Service`
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.detail)
            .filter(|d| !d.trim().is_empty());
        return Err(BackendError::Service {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl SummarizerBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn health(&self) -> Result<HealthReport, BackendError> {
        let response = self.http_client.get(self.health_url()).send().await?;
        read_json(response).await
    }

    async fn emotions(&self) -> Result<Vec<String>, BackendError> {
        let response = self.http_client.get(self.emotions_url()).send().await?;
        let list: EmotionList = read_json(response).await?;
        Ok(list.emotions)
    }

    async fn summarize(&self, request: &SubmissionRequest) -> Result<SummaryResult, BackendError> {
        let body = SummarizeBody::from(request);

        tracing::debug!(
            url = %self.summarize_url(),
            chars = request.char_count(),
            max_length = body.max_length,
            "Posting summarization request"
        );

        let response = self
            .http_client
            .post(self.summarize_url())
            .json(&body)
            .send()
            .await?;

        let result: SummaryResult = read_json(response).await?;
        result.validate()?;
        Ok(result)
    }
}
