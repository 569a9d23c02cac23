//! Plain-text rendering of client messages and snapshots

use summarizer_core::presentation::{
    badge_label, confidence_bar_class, confidence_class, emotion_class, health_class, option_label,
};
use summarizer_core::{CapabilityState, DisplayClass, NotifyLevel, SessionPhase, SessionSnapshot};

/// Short tag for a display class
pub fn class_tag(class: DisplayClass) -> &'static str {
    match class {
        DisplayClass::Positive => "positive",
        DisplayClass::Negative => "negative",
        DisplayClass::Informative => "info",
        DisplayClass::Cautionary => "caution",
        DisplayClass::Prominent => "prominent",
        DisplayClass::Neutral => "neutral",
    }
}

/// Status banner plus the override options
pub fn capability(state: &CapabilityState) -> String {
    let mut out = format!(
        "[{}] {}",
        class_tag(health_class(state.service_status)),
        state.summary_line()
    );
    if !state.supported_emotions.is_empty() {
        let options: Vec<String> = state
            .supported_emotions
            .iter()
            .map(|e| option_label(e))
            .collect();
        out.push_str(&format!("\nEmotions: Auto-detect, {}", options.join(", ")));
    }
    out
}

/// Prefix for a notification line
pub fn notify_prefix(level: NotifyLevel) -> &'static str {
    match level {
        NotifyLevel::Info => "info",
        NotifyLevel::Warning => "warning",
        NotifyLevel::Error => "error",
        NotifyLevel::Success => "ok",
    }
}

/// Result card for a finished request
pub fn outcome(snapshot: &SessionSnapshot) -> String {
    match snapshot.phase {
        SessionPhase::Success => match (&snapshot.result, &snapshot.metrics) {
            (Some(result), Some(metrics)) => {
                let mut lines = Vec::new();
                lines.push(format!(
                    "Emotion: {} [{}]",
                    badge_label(&result.detected_emotion),
                    class_tag(emotion_class(&result.detected_emotion))
                ));
                lines.push(format!(
                    "Confidence: {:.1}% {} [{}] (meter: {})",
                    metrics.confidence_percent(),
                    metrics.confidence_tier.label(),
                    class_tag(confidence_class(metrics.confidence_tier)),
                    class_tag(confidence_bar_class(metrics.confidence))
                ));
                lines.push(String::new());
                lines.push(result.summary.clone());
                lines.push(String::new());
                lines.push(format!(
                    "Length: {} -> {} chars ({:.1}% of original, {:.1}% reduction)",
                    result.input_length,
                    result.summary_length,
                    metrics.compression_percent(),
                    metrics.reduction_percent()
                ));
                lines.push(format!(
                    "Processing: {:.2}s (~{:.0} words/s)",
                    result.processing_time_secs, metrics.throughput_estimate
                ));
                lines.join("\n")
            }
            _ => SessionPhase::Success.description().to_string(),
        },
        SessionPhase::Failed => match &snapshot.error {
            Some(error) => format!("Error: {}", error.message),
            None => SessionPhase::Failed.description().to_string(),
        },
        phase => phase.description().to_string(),
    }
}
