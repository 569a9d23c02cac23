//! Client Messages
//!
//! Messages sent from the client to UI surfaces. A surface renders what it is
//! told and holds no lifecycle logic of its own.
//!
//! # Design Philosophy
//!
//! Surfaces only ever see read-only snapshots. The client owns capability and
//! session state; everything a renderer needs (phase, result, freshly derived
//! metrics, error text) travels in a [`SessionSnapshot`].

use serde::{Deserialize, Serialize};

use crate::backend::SummaryResult;
use crate::capability::CapabilityState;
use crate::metrics::DerivedMetrics;
use crate::session::{ErrorDetail, Generation, Session, SessionPhase};

/// Messages from client to UI surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Capability state changed (a probe resolved)
    Capability {
        /// Full capability state
        state: CapabilityState,
    },

    /// Session state changed
    State {
        /// Snapshot of the session
        snapshot: SessionSnapshot,
    },

    /// Show a notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Notification message
        message: String,
    },
}

/// Read-only view of a session for rendering
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session this snapshot belongs to
    pub session_id: SessionId,
    /// Current generation
    pub generation: Generation,
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// Result, when the phase is `Success`
    pub result: Option<SummaryResult>,
    /// Metrics derived from `result` at snapshot time
    pub metrics: Option<DerivedMetrics>,
    /// Error, when the phase is `Failed`
    pub error: Option<ErrorDetail>,
}

impl SessionSnapshot {
    /// Capture the current state of a session
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        let state = session.state();
        let result = state.result().cloned();
        Self {
            session_id: session.id.clone(),
            generation: session.generation(),
            phase: state.phase(),
            metrics: result.as_ref().map(DerivedMetrics::derive),
            result,
            error: state.error().cloned(),
        }
    }
}

/// Session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    ///
    /// Uses an atomic counter combined with timestamp to ensure uniqueness
    /// even when multiple sessions are created in the same millisecond.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(format!("session_{timestamp}_{count}"))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}
