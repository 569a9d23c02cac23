//! Session Management
//!
//! Tracks the request lifecycle for one client session: which submission is
//! current, whether it is still in flight, and how it ended.
//!
//! # State Machine
//!
//! ```text
//!            begin()                 resolve(g, Ok)
//!   Idle ───────────────▶ Pending ─────────────────▶ Success(result)
//!                           │  ▲
//!          resolve(g, Err)  │  │ begin()   (from Success / Failed / Pending)
//!                           ▼  │
//!                      Failed(error)
//! ```
//!
//! Every `begin()` bumps the generation counter. A resolution is applied only
//! if it carries the current generation and the session is still pending;
//! anything else is a stale response from a superseded submission.

use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, SummaryResult};
use crate::messages::SessionId;

/// Message shown when the service gives nothing more specific
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred during summarization";

/// Message shown when a success body cannot be understood
pub const DECODE_ERROR_MESSAGE: &str = "The summarization service returned an unexpected response";

/// Monotonically increasing submission identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Next generation
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of a failed request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Transport failure or timeout
    Network,
    /// Non-2xx response from the service
    Service,
    /// Success status with an unusable body
    Decode,
}

/// What a surface shows for a failed request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// HTTP status for service errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&BackendError> for ErrorDetail {
    fn from(error: &BackendError) -> Self {
        match error {
            BackendError::Network(_) | BackendError::Timeout => Self {
                kind: ErrorKind::Network,
                message: GENERIC_ERROR_MESSAGE.to_string(),
                status: None,
            },
            BackendError::Service { status, detail } => Self {
                kind: ErrorKind::Service,
                message: detail
                    .clone()
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                status: Some(*status),
            },
            BackendError::Decode(_) => Self {
                kind: ErrorKind::Decode,
                message: DECODE_ERROR_MESSAGE.to_string(),
                status: None,
            },
        }
    }
}

impl From<BackendError> for ErrorDetail {
    fn from(error: BackendError) -> Self {
        Self::from(&error)
    }
}

/// Request lifecycle state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting for the current generation's response
    Pending,
    /// Current generation succeeded
    Success(SummaryResult),
    /// Current generation failed
    Failed(ErrorDetail),
}

impl SessionState {
    /// Whether a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the state is `Success` or `Failed`
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }

    /// The successful result, if any
    #[must_use]
    pub fn result(&self) -> Option<&SummaryResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The failure detail, if any
    #[must_use]
    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short phase name
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Idle => SessionPhase::Idle,
            Self::Pending => SessionPhase::Pending,
            Self::Success(_) => SessionPhase::Success,
            Self::Failed(_) => SessionPhase::Failed,
        }
    }
}

/// Data-free view of [`SessionState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing submitted yet
    Idle,
    /// Request in flight
    Pending,
    /// Last request succeeded
    Success,
    /// Last request failed
    Failed,
}

impl SessionPhase {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Enter text and submit to see results",
            Self::Pending => "Analyzing emotions and generating summary...",
            Self::Success => "Summary ready",
            Self::Failed => "Error",
        }
    }
}

/// Outcome of applying a response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The response belonged to the current generation and was applied
    Applied,
    /// The response was from a superseded (or already resolved) generation
    Stale,
}

/// Session counters
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session was created (Unix timestamp ms)
    pub created_at: u64,
    /// Submissions started
    pub submissions: u64,
    /// Submissions that ended in `Success`
    pub successes: u64,
    /// Submissions that ended in `Failed`
    pub failures: u64,
    /// Responses dropped because a newer submission had started
    pub discarded: u64,
}

/// A client session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Session counters
    pub metadata: SessionMetadata,
    state: SessionState,
    generation: Generation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a new idle session
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Create a session with a specific ID
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            metadata: SessionMetadata {
                created_at: now_ms(),
                ..Default::default()
            },
            state: SessionState::Idle,
            generation: Generation::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current generation (`0` before the first submission)
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Start a new submission.
    ///
    /// Clears any previous result or error right away and supersedes an
    /// in-flight generation, so there is never more than one `Pending`.
    pub fn begin(&mut self) -> Generation {
        if self.state.is_pending() {
            tracing::debug!(
                superseded = %self.generation,
                "Starting new submission while previous one is in flight"
            );
        }
        self.generation = self.generation.next();
        self.state = SessionState::Pending;
        self.metadata.submissions += 1;
        self.generation
    }

    /// Apply the response for `generation`
    pub fn resolve(
        &mut self,
        generation: Generation,
        outcome: Result<SummaryResult, ErrorDetail>,
    ) -> Resolution {
        if generation != self.generation || !self.state.is_pending() {
            self.metadata.discarded += 1;
            tracing::debug!(
                response = %generation,
                current = %self.generation,
                "Discarding stale response"
            );
            return Resolution::Stale;
        }

        self.state = match outcome {
            Ok(result) => {
                self.metadata.successes += 1;
                SessionState::Success(result)
            }
            Err(error) => {
                self.metadata.failures += 1;
                SessionState::Failed(error)
            }
        };
        Resolution::Applied
    }
}

/// Get current time in milliseconds
fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
