//! Client Commands
//!
//! Commands sent from UI surfaces to the client. Surfaces forward what the
//! user did; the client decides what it means.

use serde::{Deserialize, Serialize};

use crate::submission::RawSubmission;

/// Commands from UI surface to client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ClientCommand {
    /// User pressed "Generate Summary"
    Submit {
        /// Raw form contents
        submission: RawSubmission,
    },

    /// Check service health
    ProbeHealth,

    /// Fetch the supported emotion labels
    ProbeEmotions,

    /// Re-send the current capability and session state
    Snapshot,
}

impl ClientCommand {
    /// Build a submit command from form contents
    pub fn submit(submission: RawSubmission) -> Self {
        Self::Submit { submission }
    }
}
