//! Integration tests against a mocked summarization service
//!
//! These tests drive the real HTTP backend and client through WireMock, so
//! request bodies, status handling and response decoding are all exercised.
//! Tests cover:
//! - Capability probes degrading on failure
//! - Request body shape (`emotion_override` as `null`)
//! - Service error `detail` passed through verbatim
//! - Malformed bodies reported as decode failures
//! - Derived metrics for a completed request

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use summarizer_core::session::{DECODE_ERROR_MESSAGE, GENERIC_ERROR_MESSAGE};
use summarizer_core::{
    BackendError, ClientConfig, ClientMessage, ConfidenceTier, ErrorKind, HttpBackend,
    NotifyLevel, RawSubmission, ServiceStatus, SessionPhase, SubmitError, SummarizerBackend,
    SummarizerClient, ValidationError,
};

const ARTICLE: &str = "Scientists have made a groundbreaking discovery in renewable energy \
technology that could change how we harness solar power.";

fn summary_body() -> serde_json::Value {
    json!({
        "detected_emotion": "joy",
        "emotion_confidence": 0.85,
        "summary": "Scientists made a solar breakthrough.",
        "processing_time": 2.0,
        "input_length": 200,
        "summary_length": 50
    })
}

fn client_for(
    server: &MockServer,
) -> (SummarizerClient<HttpBackend>, mpsc::Receiver<ClientMessage>) {
    let (tx, rx) = mpsc::channel(100);
    let config = ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let backend = HttpBackend::from_config(config.backend());
    (SummarizerClient::new(backend, config, tx), rx)
}

fn drain(rx: &mut mpsc::Receiver<ClientMessage>) -> Vec<ClientMessage> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}

// =============================================================================
// Capability probes
// =============================================================================

#[tokio::test]
async fn test_probes_populate_capabilities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "models_loaded": true,
            "device": "cuda"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emotions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "emotions": ["joy", "anger", "neutral"] })),
        )
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);
    let report = client.start().await;

    assert!(!report.health.is_failure());
    let caps = client.capabilities();
    assert_eq!(caps.service_status, ServiceStatus::Healthy);
    assert!(caps.models_loaded);
    assert_eq!(caps.device.as_deref(), Some("cuda"));
    assert_eq!(caps.supported_emotions, vec!["joy", "anger", "neutral"]);
}

#[tokio::test]
async fn test_health_failure_degrades_but_keeps_emotions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emotions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "emotions": ["joy", "anger", "neutral"] })),
        )
        .mount(&server)
        .await;

    let (mut client, mut rx) = client_for(&server);
    let report = client.start().await;

    assert!(report.health.is_failure());
    let caps = client.capabilities();
    assert_eq!(caps.service_status, ServiceStatus::Unhealthy);
    assert!(!caps.models_loaded);
    assert_eq!(caps.supported_emotions, vec!["joy", "anger", "neutral"]);

    let warned = drain(&mut rx).into_iter().any(|m| {
        matches!(
            m,
            ClientMessage::Notify {
                level: NotifyLevel::Warning,
                ..
            }
        )
    });
    assert!(warned, "health failure should warn the surface");
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on port 1
    let (tx, _rx) = mpsc::channel(100);
    let config = ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let backend = HttpBackend::from_config(config.backend());
    let mut client = SummarizerClient::new(backend, config, tx);

    client.start().await;
    assert_eq!(client.capabilities().service_status, ServiceStatus::Unhealthy);
    assert!(client.capabilities().supported_emotions.is_empty());

    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();
    let error = client.wait_for_outcome().await.error().cloned().unwrap();
    assert_eq!(error.kind, ErrorKind::Network);
    assert_eq!(error.message, GENERIC_ERROR_MESSAGE);
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_submit_sends_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(body_json(json!({
            "text": ARTICLE,
            "max_length": 300,
            "emotion_override": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);
    let raw = RawSubmission::new(format!("  {ARTICLE}\n"))
        .with_max_length_input("1000")
        .with_emotion_override("");
    client.submit(raw).await.unwrap();

    let state = client.wait_for_outcome().await;
    assert_eq!(state.phase(), SessionPhase::Success);
}

#[tokio::test]
async fn test_completed_request_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .mount(&server)
        .await;

    let (mut client, mut rx) = client_for(&server);
    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();
    client.wait_for_outcome().await;

    let snapshot = client.snapshot();
    let metrics = snapshot.metrics.unwrap();
    assert!((metrics.compression_percent() - 25.0).abs() < 1e-9);
    assert!((metrics.reduction_percent() - 75.0).abs() < 1e-9);
    assert!((metrics.throughput_estimate - 20.0).abs() < 1e-9);
    assert_eq!(metrics.confidence_tier, ConfidenceTier::High);

    let last_state = drain(&mut rx).into_iter().rev().find_map(|m| match m {
        ClientMessage::State { snapshot } => Some(snapshot),
        _ => None,
    });
    assert_eq!(last_state.map(|s| s.phase), Some(SessionPhase::Success));
}

#[tokio::test]
async fn test_service_detail_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Model not loaded" })),
        )
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);
    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();

    let error = client.wait_for_outcome().await.error().cloned().unwrap();
    assert_eq!(error.kind, ErrorKind::Service);
    assert_eq!(error.status, Some(500));
    assert_eq!(error.message, "Model not loaded");
}

#[tokio::test]
async fn test_service_error_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);
    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();

    let error = client.wait_for_outcome().await.error().cloned().unwrap();
    assert_eq!(error.status, Some(502));
    assert_eq!(error.message, GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": 42 })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let request = summarizer_core::SubmissionValidator::default()
        .validate(&RawSubmission::new(ARTICLE), &[])
        .unwrap();
    let result = backend.summarize(&request).await;
    assert!(matches!(result, Err(BackendError::Decode(_))));

    let (mut client, _rx) = client_for(&server);
    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();
    let error = client.wait_for_outcome().await.error().cloned().unwrap();
    assert_eq!(error.kind, ErrorKind::Decode);
    assert_eq!(error.message, DECODE_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_out_of_range_confidence_is_decode_error() {
    let server = MockServer::start().await;
    let mut body = summary_body();
    body["emotion_confidence"] = json!(1.5);
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);
    client.submit(RawSubmission::new(ARTICLE)).await.unwrap();
    let error = client.wait_for_outcome().await.error().cloned().unwrap();
    assert_eq!(error.kind, ErrorKind::Decode);
}

#[tokio::test]
async fn test_minimum_length_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (mut client, _rx) = client_for(&server);

    let rejected = client.submit(RawSubmission::new("a".repeat(49))).await;
    assert_eq!(
        rejected,
        Err(SubmitError::Invalid(ValidationError::TooShort {
            length: 49,
            minimum: 50
        }))
    );
    assert_eq!(client.state().phase(), SessionPhase::Idle);

    client.submit(RawSubmission::new("a".repeat(50))).await.unwrap();
    assert_eq!(
        client.wait_for_outcome().await.phase(),
        SessionPhase::Success
    );
}
