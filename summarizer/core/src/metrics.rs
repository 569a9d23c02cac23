//! Derived Metrics
//!
//! Presentation metrics computed from a [`SummaryResult`]. These are pure
//! functions of the result and are recomputed whenever a surface asks for
//! them; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::backend::SummaryResult;

/// Confidence at or above which the tier is `High`
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Confidence at or above which the tier is `Medium`
pub const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Rough characters-per-word used for the throughput estimate
pub const CHARS_PER_WORD: f64 = 5.0;

/// Bucketed emotion confidence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// `confidence >= 0.8`
    High,
    /// `0.6 <= confidence < 0.8`
    Medium,
    /// `confidence < 0.6`
    Low,
}

impl ConfidenceTier {
    /// Classify a confidence score (both thresholds inclusive)
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            Self::High
        } else if confidence >= MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Metrics derived from one result
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// `summary_length / input_length`, 0 when the input is empty
    pub compression_ratio: f64,
    /// `1 - compression_ratio`
    pub text_reduction: f64,
    /// Estimated input words processed per second, 0 when time is 0
    pub throughput_estimate: f64,
    /// Tier of the emotion confidence
    pub confidence_tier: ConfidenceTier,
    /// Raw confidence, carried for percent display
    pub confidence: f64,
}

impl DerivedMetrics {
    /// Compute metrics for a result
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn derive(result: &SummaryResult) -> Self {
        let compression_ratio = if result.input_length == 0 {
            0.0
        } else {
            result.summary_length as f64 / result.input_length as f64
        };

        let throughput_estimate = if result.processing_time_secs > 0.0 {
            (result.input_length as f64 / CHARS_PER_WORD) / result.processing_time_secs
        } else {
            0.0
        };

        Self {
            compression_ratio,
            text_reduction: 1.0 - compression_ratio,
            throughput_estimate,
            confidence_tier: ConfidenceTier::from_confidence(result.emotion_confidence),
            confidence: result.emotion_confidence,
        }
    }

    /// Compression ratio as a percentage
    #[must_use]
    pub fn compression_percent(&self) -> f64 {
        self.compression_ratio * 100.0
    }

    /// Text reduction as a percentage
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        self.text_reduction * 100.0
    }

    /// Confidence as a percentage
    #[must_use]
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

impl From<&SummaryResult> for DerivedMetrics {
    fn from(result: &SummaryResult) -> Self {
        Self::derive(result)
    }
}
