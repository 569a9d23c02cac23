//! Submission Validation
//!
//! Turns raw surface input (text box contents, the max-length field, the
//! emotion-override selector) into a [`SubmissionRequest`] the orchestrator
//! can dispatch.
//!
//! Validation happens before any network activity. A rejected submission
//! produces a [`ValidationError`] and has no side effect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum trimmed text length, in characters
pub const MIN_TEXT_CHARS: usize = 50;

/// Smallest accepted summary length
pub const MIN_MAX_LENGTH: u32 = 50;

/// Largest accepted summary length
pub const MAX_MAX_LENGTH: u32 = 300;

/// Summary length used when the field is missing or not a number
pub const DEFAULT_MAX_LENGTH: u32 = 150;

/// Limits applied to submissions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionLimits {
    /// Optional cap on trimmed text length in characters (default: none)
    pub max_text_chars: Option<usize>,
    /// Summary length substituted for missing/non-numeric input (default: 150)
    pub default_max_length: u32,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_text_chars: None,
            default_max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Reasons a submission is refused locally
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Trimmed text is shorter than the minimum
    #[error("Please enter at least {minimum} characters for summarization (got {length})")]
    TooShort {
        /// Trimmed length in characters
        length: usize,
        /// Required minimum
        minimum: usize,
    },

    /// Trimmed text exceeds an explicitly configured cap
    #[error("Text too long: {length} characters (max: {maximum})")]
    TooLong {
        /// Trimmed length in characters
        length: usize,
        /// Configured maximum
        maximum: usize,
    },
}

/// Unvalidated input as a surface collected it
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    /// Text as typed, untrimmed
    pub text: String,
    /// Raw contents of the max-length field (may be missing or non-numeric)
    pub max_length: Option<String>,
    /// Selected emotion override; empty means "auto-detect"
    pub emotion_override: Option<String>,
}

impl RawSubmission {
    /// Create a submission with only text set
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the max-length field from a number
    #[must_use]
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length.to_string());
        self
    }

    /// Set the max-length field from raw widget text
    #[must_use]
    pub fn with_max_length_input(mut self, raw: impl Into<String>) -> Self {
        self.max_length = Some(raw.into());
        self
    }

    /// Set the emotion override selection
    #[must_use]
    pub fn with_emotion_override(mut self, emotion: impl Into<String>) -> Self {
        self.emotion_override = Some(emotion.into());
        self
    }
}

/// A validated, immutable request ready for dispatch
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    text: String,
    max_length: u32,
    emotion_override: Option<String>,
}

impl SubmissionRequest {
    /// Trimmed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Summary length in `[MIN_MAX_LENGTH, MAX_MAX_LENGTH]`
    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    /// Emotion override, never an empty string
    pub fn emotion_override(&self) -> Option<&str> {
        self.emotion_override.as_deref()
    }

    /// Length of the text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Validator for raw submissions
#[derive(Clone, Debug, Default)]
pub struct SubmissionValidator {
    limits: SubmissionLimits,
}

impl SubmissionValidator {
    /// Create a new validator with the given limits
    pub fn new(limits: SubmissionLimits) -> Self {
        Self { limits }
    }

    /// Get the current limits
    pub fn limits(&self) -> &SubmissionLimits {
        &self.limits
    }

    /// Validate raw input and shape it into a request.
    ///
    /// `supported_emotions` is the probed label list. An override outside a
    /// non-empty list is still sent (the service falls back to detection) but
    /// is logged.
    pub fn validate(
        &self,
        raw: &RawSubmission,
        supported_emotions: &[String],
    ) -> Result<SubmissionRequest, ValidationError> {
        let text = raw.text.trim();
        let length = text.chars().count();

        if length < MIN_TEXT_CHARS {
            return Err(ValidationError::TooShort {
                length,
                minimum: MIN_TEXT_CHARS,
            });
        }

        if let Some(maximum) = self.limits.max_text_chars {
            if length > maximum {
                return Err(ValidationError::TooLong { length, maximum });
            }
        }

        let max_length = self.resolve_max_length(raw.max_length.as_deref());
        let emotion_override = normalize_override(raw.emotion_override.as_deref());

        if let Some(ref emotion) = emotion_override {
            if !supported_emotions.is_empty() && !supported_emotions.iter().any(|e| e == emotion) {
                tracing::warn!(
                    emotion = %emotion,
                    "Emotion override is not in the supported list; service will auto-detect"
                );
            }
        }

        Ok(SubmissionRequest {
            text: text.to_string(),
            max_length,
            emotion_override,
        })
    }

    /// Parse and clamp the max-length field
    fn resolve_max_length(&self, raw: Option<&str>) -> u32 {
        let fallback = self
            .limits
            .default_max_length
            .clamp(MIN_MAX_LENGTH, MAX_MAX_LENGTH);

        match raw.and_then(leading_integer) {
            Some(value) => {
                let clamped = value.clamp(i64::from(MIN_MAX_LENGTH), i64::from(MAX_MAX_LENGTH));
                u32::try_from(clamped).unwrap_or(fallback)
            }
            None => fallback,
        }
    }
}

/// Integer prefix of a form field: `"250px"` is 250, `"200.7"` is 200.
///
/// Leading whitespace and one sign are accepted. No digits means `None`.
/// Values beyond `i64` saturate, since the caller clamps anyway.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}

/// Whether `text` would pass the minimum-length check
#[must_use]
pub fn can_submit(text: &str) -> bool {
    text.trim().chars().count() >= MIN_TEXT_CHARS
}

/// Characters still needed before `text` can be submitted
#[must_use]
pub fn characters_remaining(text: &str) -> usize {
    MIN_TEXT_CHARS.saturating_sub(text.trim().chars().count())
}

fn normalize_override(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
