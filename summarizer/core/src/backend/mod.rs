//! Summarization Service Integration
//!
//! This module provides abstracted access to the summarization service
//! through a common trait interface.
//!
//! # Available Backends
//!
//! - **HTTP**: The JSON API served by the summarization service (default)
//!
//! # Usage
//!
//! ```ignore
//! use summarizer_core::backend::{HttpBackend, SummarizerBackend};
//!
//! let backend = HttpBackend::new("http://localhost:8000");
//! let report = backend.health().await?;
//! ```

mod http;
mod traits;

pub use http::HttpBackend;
pub use traits::{
    with_deadline, BackendConfig, BackendError, EmotionList, ErrorBody, HealthReport,
    SummarizeBody, SummarizerBackend, SummaryResult,
};
