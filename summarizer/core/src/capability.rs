//! Capability Probe
//!
//! Startup checks of what the summarization service can do right now: is it
//! up, are its models loaded, which emotion labels does it accept.
//!
//! The two probes are independent. Either one failing never stops the other,
//! and neither is retried: each runs at most once per session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::{with_deadline, BackendError, HealthReport, SummarizerBackend};

/// Service availability as last observed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Health probe has not resolved yet
    #[default]
    Unknown,
    /// Service reported itself healthy
    Healthy,
    /// Health probe failed or the service reported a problem
    Unhealthy,
}

impl ServiceStatus {
    /// Wire/display name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the client currently knows about the service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityState {
    /// Health status (`Unknown` only before the health probe resolves)
    pub service_status: ServiceStatus,
    /// Whether the service's models are loaded
    pub models_loaded: bool,
    /// Inference device reported by the service
    pub device: Option<String>,
    /// Emotion labels offered for the override selector (possibly empty)
    pub supported_emotions: Vec<String>,
}

impl CapabilityState {
    /// Whether the service is known to be healthy
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.service_status == ServiceStatus::Healthy
    }

    /// One-line status for a banner
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "API Status: {} | Models: {} | Device: {}",
            self.service_status,
            if self.models_loaded { "Loaded" } else { "Not Loaded" },
            self.device.as_deref().unwrap_or("unknown")
        )
    }

    fn apply_health(&mut self, outcome: &Result<HealthReport, BackendError>) {
        match outcome {
            Ok(report) => {
                self.service_status = if report.is_healthy() {
                    ServiceStatus::Healthy
                } else {
                    ServiceStatus::Unhealthy
                };
                self.models_loaded = report.models_loaded;
                self.device.clone_from(&report.device);
            }
            Err(_) => {
                self.service_status = ServiceStatus::Unhealthy;
                self.models_loaded = false;
                self.device = None;
            }
        }
    }

    fn apply_emotions(&mut self, outcome: &Result<Vec<String>, BackendError>) {
        if let Ok(emotions) = outcome {
            self.supported_emotions.clone_from(emotions);
        }
    }
}

/// Result of one probe invocation
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeOutcome {
    /// The probe ran and the service answered
    Succeeded,
    /// The probe ran and failed; state was degraded accordingly
    Failed(BackendError),
    /// The probe had already run this session; nothing was sent
    Skipped,
}

impl ProbeOutcome {
    /// Whether the probe ran and failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    fn from_result<T>(result: &Result<T, BackendError>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(e) => Self::Failed(e.clone()),
        }
    }
}

/// Outcomes of running both probes
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeReport {
    /// Health probe outcome
    pub health: ProbeOutcome,
    /// Emotions probe outcome
    pub emotions: ProbeOutcome,
}

/// Runs the capability probes and owns [`CapabilityState`]
#[derive(Debug)]
pub struct CapabilityProbe {
    state: CapabilityState,
    timeout: Option<Duration>,
    health_attempted: bool,
    emotions_attempted: bool,
}

impl CapabilityProbe {
    /// Create a probe; `timeout` bounds each call (`None` = no bound)
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            state: CapabilityState::default(),
            timeout,
            health_attempted: false,
            emotions_attempted: false,
        }
    }

    /// Current capability state
    pub fn state(&self) -> &CapabilityState {
        &self.state
    }

    /// Run the health probe (once per session)
    pub async fn probe_health<B>(&mut self, backend: &B) -> ProbeOutcome
    where
        B: SummarizerBackend + ?Sized,
    {
        if self.health_attempted {
            tracing::debug!("Health probe already ran this session");
            return ProbeOutcome::Skipped;
        }
        self.health_attempted = true;

        let result = with_deadline(self.timeout, backend.health()).await;
        self.finish_health(result)
    }

    /// Run the emotions probe (once per session)
    pub async fn probe_emotions<B>(&mut self, backend: &B) -> ProbeOutcome
    where
        B: SummarizerBackend + ?Sized,
    {
        if self.emotions_attempted {
            tracing::debug!("Emotions probe already ran this session");
            return ProbeOutcome::Skipped;
        }
        self.emotions_attempted = true;

        let result = with_deadline(self.timeout, backend.emotions()).await;
        self.finish_emotions(result)
    }

    /// Run both probes concurrently
    pub async fn probe_all<B>(&mut self, backend: &B) -> ProbeReport
    where
        B: SummarizerBackend + ?Sized,
    {
        let run_health = !self.health_attempted;
        let run_emotions = !self.emotions_attempted;
        self.health_attempted = true;
        self.emotions_attempted = true;

        let timeout = self.timeout;
        let (health, emotions) = tokio::join!(
            async {
                if run_health {
                    Some(with_deadline(timeout, backend.health()).await)
                } else {
                    None
                }
            },
            async {
                if run_emotions {
                    Some(with_deadline(timeout, backend.emotions()).await)
                } else {
                    None
                }
            },
        );

        ProbeReport {
            health: health.map_or(ProbeOutcome::Skipped, |r| self.finish_health(r)),
            emotions: emotions.map_or(ProbeOutcome::Skipped, |r| self.finish_emotions(r)),
        }
    }

    fn finish_health(&mut self, result: Result<HealthReport, BackendError>) -> ProbeOutcome {
        match &result {
            Ok(report) => tracing::info!(
                status = %report.status,
                models_loaded = report.models_loaded,
                device = report.device.as_deref().unwrap_or("-"),
                "Health probe succeeded"
            ),
            Err(e) => tracing::warn!(error = %e, "Health probe failed"),
        }
        self.state.apply_health(&result);
        ProbeOutcome::from_result(&result)
    }

    fn finish_emotions(&mut self, result: Result<Vec<String>, BackendError>) -> ProbeOutcome {
        match &result {
            Ok(emotions) => tracing::info!(count = emotions.len(), "Fetched supported emotions"),
            Err(e) => tracing::warn!(error = %e, "Failed to fetch emotions"),
        }
        self.state.apply_emotions(&result);
        ProbeOutcome::from_result(&result)
    }
}
