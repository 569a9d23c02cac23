//! Presentation Mapping
//!
//! Maps categorical values to a small, fixed set of display classes. Surfaces
//! translate a [`DisplayClass`] into whatever their toolkit uses (colours,
//! badge styles, ANSI codes). Every lookup is total: unknown input falls back
//! to [`DisplayClass::Neutral`].

use serde::{Deserialize, Serialize};

use crate::capability::ServiceStatus;
use crate::metrics::ConfidenceTier;

/// Display classes a surface must be able to render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayClass {
    /// Good news (green)
    Positive,
    /// Bad news (red)
    Negative,
    /// Calm information (light blue)
    Informative,
    /// Needs attention (amber)
    Cautionary,
    /// Stand-out (brand blue)
    Prominent,
    /// Default (grey)
    #[default]
    Neutral,
}

/// Display class for an emotion label
#[must_use]
pub fn emotion_class(label: &str) -> DisplayClass {
    match label.trim().to_ascii_lowercase().as_str() {
        "joy" | "gratitude" | "optimism" | "love" => DisplayClass::Positive,
        "anger" => DisplayClass::Negative,
        "sadness" => DisplayClass::Informative,
        "fear" | "excitement" => DisplayClass::Cautionary,
        "surprise" | "pride" => DisplayClass::Prominent,
        _ => DisplayClass::Neutral,
    }
}

/// Display class for a confidence tier
#[must_use]
pub fn confidence_class(tier: ConfidenceTier) -> DisplayClass {
    match tier {
        ConfidenceTier::High => DisplayClass::Positive,
        ConfidenceTier::Medium => DisplayClass::Cautionary,
        ConfidenceTier::Low => DisplayClass::Negative,
    }
}

/// Display class for a confidence meter.
///
/// The meter uses exclusive `0.7` / `0.5` cut-offs, independent of the tier
/// thresholds.
#[must_use]
pub fn confidence_bar_class(confidence: f64) -> DisplayClass {
    if confidence > 0.7 {
        DisplayClass::Positive
    } else if confidence > 0.5 {
        DisplayClass::Cautionary
    } else {
        DisplayClass::Negative
    }
}

/// Display class for the service status banner
#[must_use]
pub fn health_class(status: ServiceStatus) -> DisplayClass {
    match status {
        ServiceStatus::Healthy => DisplayClass::Positive,
        ServiceStatus::Unhealthy => DisplayClass::Negative,
        ServiceStatus::Unknown => DisplayClass::Neutral,
    }
}

/// Label for the override selector ("joy" -> "Joy")
#[must_use]
pub fn option_label(emotion: &str) -> String {
    let mut chars = emotion.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label for the detected-emotion badge ("joy" -> "JOY")
#[must_use]
pub fn badge_label(emotion: &str) -> String {
    emotion.to_uppercase()
}
