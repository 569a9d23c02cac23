//! Summarization Backend Traits
//!
//! Trait definitions and wire types for the summarization service. This
//! abstraction lets the client drive the real HTTP service, an in-memory mock,
//! or anything else that speaks the same contract without changing core logic.
//!
//! # Design Philosophy
//!
//! The `SummarizerBackend` trait provides a common interface for:
//! - Health checking the service
//! - Querying the supported emotion labels
//! - Submitting text for summarization
//!
//! Implementations handle transport details (HTTP, timeouts, body decoding)
//! and report failures through [`BackendError`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::submission::SubmissionRequest;

/// Health report returned by `GET /health`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Service-reported status ("healthy" when everything is up)
    pub status: String,
    /// Whether the inference models are loaded
    #[serde(default)]
    pub models_loaded: bool,
    /// Inference device, if the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl HealthReport {
    /// Whether the service declared itself healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of `GET /emotions`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionList {
    /// Supported emotion labels, in service order
    pub emotions: Vec<String>,
}

/// Body of `POST /summarize`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeBody {
    /// Trimmed input text
    pub text: String,
    /// Requested maximum summary length
    pub max_length: u32,
    /// Emotion to use instead of detection (`null` when absent)
    pub emotion_override: Option<String>,
}

impl From<&SubmissionRequest> for SummarizeBody {
    fn from(request: &SubmissionRequest) -> Self {
        Self {
            text: request.text().to_string(),
            max_length: request.max_length(),
            emotion_override: request.emotion_override().map(String::from),
        }
    }
}

/// Successful summarization response
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Emotion the service detected (or the override it honoured)
    pub detected_emotion: String,
    /// Confidence of the detected emotion, in `[0, 1]`
    pub emotion_confidence: f64,
    /// Generated summary
    pub summary: String,
    /// Server-side processing time in seconds
    #[serde(rename = "processing_time")]
    pub processing_time_secs: f64,
    /// Length of the submitted text in characters
    pub input_length: u64,
    /// Length of the summary in characters
    pub summary_length: u64,
}

impl SummaryResult {
    /// Check the numeric ranges the service promises.
    ///
    /// A body that parses but violates these ranges is treated the same as a
    /// body that does not parse at all.
    pub fn validate(&self) -> Result<(), BackendError> {
        if !self.emotion_confidence.is_finite() || !(0.0..=1.0).contains(&self.emotion_confidence)
        {
            return Err(BackendError::Decode(format!(
                "emotion_confidence out of range: {}",
                self.emotion_confidence
            )));
        }
        if !self.processing_time_secs.is_finite() || self.processing_time_secs < 0.0 {
            return Err(BackendError::Decode(format!(
                "processing_time out of range: {}",
                self.processing_time_secs
            )));
        }
        Ok(())
    }
}

/// Structured error body (`{"detail": "..."}`) sent with non-2xx statuses
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub detail: String,
}

/// Failures talking to the summarization service
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BackendError {
    /// Transport-level failure (connection refused, DNS, reset...)
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete in time
    #[error("request timed out")]
    Timeout,

    /// Service answered with a non-2xx status
    #[error("service returned {status}: {}", detail.as_deref().unwrap_or("<no detail>"))]
    Service {
        /// HTTP status code
        status: u16,
        /// Structured `detail` field, when the body carried one
        detail: Option<String>,
    },

    /// Success status but the body did not have the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Run a backend call with an optional deadline.
///
/// Expiry maps to [`BackendError::Timeout`]; `None` waits indefinitely.
pub async fn with_deadline<T, F>(deadline: Option<Duration>, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(BackendError::Timeout)),
        None => call.await,
    }
}

/// Summarization backend trait
///
/// Implement this trait to point the client at a different transport.
#[async_trait]
pub trait SummarizerBackend: Send + Sync {
    /// Get the backend name (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Fetch the service health report
    async fn health(&self) -> Result<HealthReport, BackendError>;

    /// Fetch the supported emotion labels
    async fn emotions(&self) -> Result<Vec<String>, BackendError>;

    /// Submit a validated request and wait for the summary
    async fn summarize(&self, request: &SubmissionRequest) -> Result<SummaryResult, BackendError>;
}

/// Backend connection configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl BackendConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("SUMMARIZER_API_URL")
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Join an endpoint path onto the base URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
