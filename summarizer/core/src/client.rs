//! Summarizer Client - The Orchestration Core
//!
//! The client is the "brain" of the summarizer. It orchestrates:
//! - Capability probes against the service
//! - Submission validation
//! - The single-flight request lifecycle
//! - Communication with UI surfaces
//!
//! # Design Philosophy
//!
//! The client is UI-agnostic. It doesn't know whether it's driving a terminal,
//! a web page, or a test harness. It communicates through:
//! - `ClientCommand`: Commands received FROM the surface
//! - `ClientMessage`: Snapshots and notifications sent TO the surface
//!
//! # Superseded Requests
//!
//! There is no cancellation. Each submission runs as its own task and reports
//! back tagged with its [`Generation`]; only the current generation may move
//! the session out of `Pending`. A response that arrives after a newer
//! submission started is counted and dropped.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::backend::{with_deadline, BackendError, SummarizerBackend, SummaryResult};
use crate::capability::{CapabilityProbe, CapabilityState, ProbeOutcome, ProbeReport};
use crate::config::{ClientConfig, PendingPolicy};
use crate::events::ClientCommand;
use crate::messages::{ClientMessage, NotifyLevel, SessionId, SessionSnapshot};
use crate::session::{ErrorDetail, Generation, Resolution, Session, SessionState};
use crate::submission::{RawSubmission, SubmissionValidator, ValidationError};

/// Why a submission was not started
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Input failed local validation; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A request is pending and the policy is `Reject`
    #[error("a summarization request is already in progress")]
    Busy,
}

/// A finished backend call, tagged with the generation that issued it
struct Completion {
    generation: Generation,
    outcome: Result<SummaryResult, BackendError>,
}

/// The summarizer client - headless orchestration core
pub struct SummarizerClient<B: SummarizerBackend> {
    /// Configuration
    config: ClientConfig,
    /// Summarization backend
    backend: Arc<B>,
    /// Capability probe and its state
    probe: CapabilityProbe,
    /// Request lifecycle
    session: Session,
    /// Validator for raw submissions
    validator: SubmissionValidator,
    /// Channel to send messages to the UI surface
    tx: mpsc::Sender<ClientMessage>,
    /// Finished requests flow back through here
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<B: SummarizerBackend + 'static> SummarizerClient<B> {
    /// Create a new client with the given backend
    pub fn new(backend: B, config: ClientConfig, tx: mpsc::Sender<ClientMessage>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            probe: CapabilityProbe::new(config.probe_timeout),
            validator: SubmissionValidator::new(config.limits.clone()),
            config,
            backend: Arc::new(backend),
            session: Session::new(),
            tx,
            completion_tx,
            completion_rx,
        }
    }

    /// Get the session ID
    pub fn session_id(&self) -> &SessionId {
        &self.session.id
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get current lifecycle state
    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Get the current generation
    pub fn generation(&self) -> Generation {
        self.session.generation()
    }

    /// Get capability state
    pub fn capabilities(&self) -> &CapabilityState {
        self.probe.state()
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the session for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session)
    }

    /// Start the client: run both capability probes concurrently
    pub async fn start(&mut self) -> ProbeReport {
        tracing::info!(
            session = %self.session.id,
            backend = self.backend.name(),
            "Starting summarizer client"
        );

        let report = self.probe.probe_all(self.backend.as_ref()).await;
        self.after_health(&report.health).await;
        self.publish_capability().await;
        report
    }

    /// Run the health probe
    pub async fn probe_health(&mut self) -> ProbeOutcome {
        let outcome = self.probe.probe_health(self.backend.as_ref()).await;
        self.after_health(&outcome).await;
        if outcome != ProbeOutcome::Skipped {
            self.publish_capability().await;
        }
        outcome
    }

    /// Run the emotions probe.
    ///
    /// Failure is logged only; the override selector simply stays empty.
    pub async fn probe_emotions(&mut self) -> ProbeOutcome {
        let outcome = self.probe.probe_emotions(self.backend.as_ref()).await;
        if outcome != ProbeOutcome::Skipped {
            self.publish_capability().await;
        }
        outcome
    }

    /// Validate and dispatch a submission.
    ///
    /// On success the session is `Pending` for the returned generation and
    /// any previous result or error is already cleared.
    pub async fn submit(&mut self, raw: RawSubmission) -> Result<Generation, SubmitError> {
        let request = match self
            .validator
            .validate(&raw, &self.probe.state().supported_emotions)
        {
            Ok(request) => request,
            Err(reason) => {
                tracing::warn!(reason = %reason, "Rejected submission");
                self.notify(NotifyLevel::Warning, &reason.to_string()).await;
                return Err(reason.into());
            }
        };

        if self.session.state().is_pending() && self.config.pending_policy == PendingPolicy::Reject {
            tracing::debug!(current = %self.session.generation(), "Submission refused while pending");
            return Err(SubmitError::Busy);
        }

        let generation = self.session.begin();
        tracing::info!(
            generation = generation.0,
            chars = request.char_count(),
            max_length = request.max_length(),
            emotion_override = request.emotion_override().unwrap_or("auto"),
            "Submitting text for summarization"
        );

        let backend = Arc::clone(&self.backend);
        let done = self.completion_tx.clone();
        let deadline = self.config.request_timeout;
        tokio::spawn(async move {
            let call = tokio::spawn(async move {
                with_deadline(deadline, backend.summarize(&request)).await
            });
            // A panicking backend still has to resolve its generation
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(generation = generation.0, error = %e, "Summarization task died");
                    Err(BackendError::Network(format!("request task failed: {e}")))
                }
            };
            // Receiver only goes away with the client itself
            let _ = done.send(Completion {
                generation,
                outcome,
            });
        });

        self.publish_state().await;
        Ok(generation)
    }

    /// Apply any finished requests without waiting.
    ///
    /// Returns true if the session state changed.
    pub async fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply_completion(completion).await == Resolution::Applied {
                changed = true;
            }
        }
        changed
    }

    /// Wait until the current generation resolves and return the new state.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn wait_for_outcome(&mut self) -> &SessionState {
        while self.session.state().is_pending() {
            match self.completion_rx.recv().await {
                Some(completion) => {
                    self.apply_completion(completion).await;
                }
                None => break,
            }
        }
        self.session.state()
    }

    /// Handle a command from the UI surface
    pub async fn handle_command(&mut self, command: ClientCommand) -> Result<(), SubmitError> {
        match command {
            ClientCommand::Submit { submission } => {
                self.submit(submission).await?;
            }
            ClientCommand::ProbeHealth => {
                self.probe_health().await;
            }
            ClientCommand::ProbeEmotions => {
                self.probe_emotions().await;
            }
            ClientCommand::Snapshot => {
                self.publish_capability().await;
                self.publish_state().await;
            }
        }
        Ok(())
    }

    async fn apply_completion(&mut self, completion: Completion) -> Resolution {
        let Completion {
            generation,
            outcome,
        } = completion;

        if let Err(ref e) = outcome {
            tracing::warn!(generation = generation.0, error = %e, "Summarization request failed");
        }

        let resolution = self
            .session
            .resolve(generation, outcome.map_err(ErrorDetail::from));

        if resolution == Resolution::Applied {
            match self.session.state() {
                SessionState::Success(result) => tracing::info!(
                    generation = generation.0,
                    emotion = %result.detected_emotion,
                    confidence = result.emotion_confidence,
                    summary_length = result.summary_length,
                    "Summary received"
                ),
                SessionState::Failed(error) => {
                    let message = error.message.clone();
                    self.notify(NotifyLevel::Error, &message).await;
                }
                SessionState::Idle | SessionState::Pending => {}
            }
            self.publish_state().await;
        }
        resolution
    }

    async fn after_health(&self, outcome: &ProbeOutcome) {
        if outcome.is_failure() {
            self.notify(NotifyLevel::Warning, "Summarization service unavailable")
                .await;
        }
    }

    async fn publish_capability(&self) {
        self.send(ClientMessage::Capability {
            state: self.probe.state().clone(),
        })
        .await;
    }

    async fn publish_state(&self) {
        self.send(ClientMessage::State {
            snapshot: self.snapshot(),
        })
        .await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(ClientMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: ClientMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
