//! Summarizer Core - Headless Client for the Emotion-Aware Summarization Service
//!
//! This crate provides the client-side logic for an emotion-aware text
//! summarization service, completely independent of any UI framework. It can
//! drive a terminal, a web page, a desktop app, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                               │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────────────────────────────┐  │
//! │  │   CLI   │  │  WebUI  │  │       Tests / Headless          │  │
//! │  └────┬────┘  └────┬────┘  └────────────────┬────────────────┘  │
//! │       └────────────┴────────────────────────┘                   │
//! │                           │                                      │
//! │                    ClientCommand (up)                           │
//! │                    ClientMessage (down)                         │
//! └───────────────────────────┼──────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────────────┐
//! │                    SUMMARIZER CORE                               │
//! │  ┌────────────────────────┴────────────────────────────────────┐ │
//! │  │                    SummarizerClient                          │ │
//! │  │  ┌────────────┐  ┌────────────┐  ┌─────────┐  ┌──────────┐  │ │
//! │  │  │ Capability │  │ Submission │  │ Session │  │ Backend  │  │ │
//! │  │  │   Probe    │  │ Validator  │  │ (gen.)  │  │  (HTTP)  │  │ │
//! │  │  └────────────┘  └────────────┘  └─────────┘  └──────────┘  │ │
//! │  └─────────────────────────────────────────────────────────────┘ │
//! │        metrics · presentation · samples (pure helpers)           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SummarizerClient`]: Orchestrates probes, submissions and responses
//! - [`ClientMessage`]: Messages sent from the client to UI surfaces
//! - [`ClientCommand`]: Commands sent from UI surfaces to the client
//! - [`Session`]: Request lifecycle with generation tracking
//! - [`CapabilityState`]: What the service says it can do
//! - [`DerivedMetrics`]: Figures computed from a summary result
//!
//! # Quick Start
//!
//! ```ignore
//! use summarizer_core::{HttpBackend, ClientConfig, RawSubmission, SummarizerClient};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let config = ClientConfig::from_env();
//!     let backend = HttpBackend::from_config(config.backend());
//!     let mut client = SummarizerClient::new(backend, config, tx);
//!
//!     client.start().await;
//!     client.submit(RawSubmission::new(long_text)).await?;
//!     let state = client.wait_for_outcome().await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message to UI
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: Service transport abstraction (HTTP)
//! - [`capability`]: Health and emotion-list probes
//! - [`client`]: Main `SummarizerClient` struct
//! - [`config`]: Layered configuration (defaults, TOML, environment)
//! - [`events`]: Commands from UI surfaces to the client
//! - [`messages`]: Messages from the client to UI surfaces
//! - [`metrics`]: Compression, reduction, throughput and confidence tiers
//! - [`presentation`]: Emotion, confidence and health display classes
//! - [`samples`]: Built-in sample texts
//! - [`session`]: Request lifecycle and stale-response handling
//! - [`submission`]: Input validation and normalization
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure client logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod capability;
pub mod client;
pub mod config;
pub mod events;
pub mod messages;
pub mod metrics;
pub mod presentation;
pub mod samples;
pub mod session;
pub mod submission;

// Re-exports for convenience
pub use backend::{
    BackendConfig, BackendError, HealthReport, HttpBackend, SummarizerBackend, SummaryResult,
};
pub use capability::{CapabilityProbe, CapabilityState, ProbeOutcome, ProbeReport, ServiceStatus};
pub use client::{SubmitError, SummarizerClient};
pub use config::{load_config, ClientConfig, ConfigError, PendingPolicy};
pub use events::ClientCommand;
pub use messages::{ClientMessage, NotifyLevel, SessionId, SessionSnapshot};
pub use metrics::{ConfidenceTier, DerivedMetrics};
pub use presentation::DisplayClass;
pub use samples::{find_sample, SampleText, SAMPLE_TEXTS};
pub use session::{
    ErrorDetail, ErrorKind, Generation, Resolution, Session, SessionPhase, SessionState,
};
pub use submission::{
    can_submit, characters_remaining, RawSubmission, SubmissionLimits, SubmissionRequest,
    SubmissionValidator, ValidationError,
};
