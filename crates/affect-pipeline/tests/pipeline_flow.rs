//! End-to-end pipeline flows against mocked vendor APIs.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use affect_client::{client_for, ClientConfig};
use affect_models::{EmotionCategory, VendorKind};
use affect_pipeline::{Pipeline, PipelineConfig, PipelineError};

fn media_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    file.write_all(b"mp3 bytes").unwrap();
    file
}

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        poll_interval: Duration::from_millis(10),
        max_wait: Duration::from_secs(5),
        max_retries: 2,
        retry_delay: Duration::from_millis(10),
        max_concurrent_jobs: 2,
    }
}

fn client_config(kind: VendorKind, base_url: String) -> ClientConfig {
    let mut config = ClientConfig::for_vendor(kind);
    config.api_key = "test-key".to_string();
    config.client_id = "c-100".to_string();
    config.base_url = base_url;
    config
}

#[tokio::test]
async fn behavioral_signals_flow_produces_normalized_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v5/clients/c-100/processes/audio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pid": 88, "status": 0, "statusmsg": "queued"
        })))
        .mount(&server)
        .await;

    // First status query sees the job still running, the second completion.
    Mock::given(method("GET"))
        .and(path("/v5/clients/c-100/processes/88"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 1
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v5/clients/c-100/processes/88"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 2
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v5/clients/c-100/processes/88/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"task": "emotion", "finalLabel": "happy",
                 "prediction": [{"label": "happy", "posterior": 0.9}]},
                {"task": "emotion", "finalLabel": "happy",
                 "prediction": [{"label": "happy", "posterior": 0.7}]},
                {"task": "emotion", "finalLabel": "sad",
                 "prediction": [{"label": "sad", "posterior": 0.6}]},
                {"task": "asr", "finalLabel": "hello", "endTime": 42.5},
                {"task": "language", "finalLabel": "en"}
            ]
        })))
        .mount(&server)
        .await;

    let vendor = client_for(
        VendorKind::BehavioralSignals,
        client_config(VendorKind::BehavioralSignals, server.uri()),
    )
    .unwrap();
    let pipeline = Pipeline::new(Arc::from(vendor), fast_config());

    let file = media_fixture();
    let result = pipeline.process(file.path()).await.unwrap();

    let primary = result.primary_emotion().unwrap();
    assert_eq!(primary.category, EmotionCategory::Joy);
    assert!((primary.score - 2.0 / 3.0).abs() < 1e-6);
    assert!((primary.confidence - 0.8).abs() < 1e-6);

    let total: f64 = result.emotions.iter().map(|e| e.score).sum();
    assert!((total - 1.0).abs() < 1e-6);

    assert_eq!(result.metadata.vendor_name, "Behavioral Signals");
    assert_eq!(result.metadata.duration_seconds, Some(42.5));
    assert!(result.metadata.processing_time_seconds.is_some());
    let summary = result.summary.unwrap();
    assert!(summary.contains("Primary emotion: happy (67%)"));
    assert!(summary.contains("Language: EN"));
}

#[tokio::test]
async fn hume_flow_uses_weighted_scoring() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batch/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": "job-e2e"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/batch/jobs/job-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": {"status": "COMPLETED"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/batch/jobs/job-e2e/predictions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "models": {
                "language": {
                    "predictions": [{
                        "time": {"begin": 0.0, "end": 12.0},
                        "emotions": [
                            {"name": "Joy", "score": 0.5},
                            {"name": "Amusement", "score": 0.3},
                            {"name": "Sadness", "score": 0.2}
                        ]
                    }]
                }
            }
        }])))
        .mount(&server)
        .await;

    let vendor = client_for(
        VendorKind::HumeAi,
        client_config(VendorKind::HumeAi, server.uri()),
    )
    .unwrap();
    let pipeline = Pipeline::new(Arc::from(vendor), fast_config());

    let file = media_fixture();
    let result = pipeline.process(file.path()).await.unwrap();

    // Joy and Amusement merge into one Joy entry at 0.8.
    assert_eq!(result.emotions.len(), 2);
    assert_eq!(result.emotions[0].category, EmotionCategory::Joy);
    assert!((result.emotions[0].score - 0.8).abs() < 1e-6);
    assert_eq!(result.emotions[1].category, EmotionCategory::Sadness);

    assert_eq!(result.metadata.vendor_name, "Hume AI");
    assert_eq!(result.metadata.duration_seconds, Some(12.0));
}

#[tokio::test]
async fn vendor_failure_is_retried_then_surfaced() {
    let server = MockServer::start().await;

    // Submission always fails; both attempts burn, then the last cause is
    // wrapped with the attempt count.
    Mock::given(method("POST"))
        .and(path("/batch/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(2)
        .mount(&server)
        .await;

    let vendor = client_for(
        VendorKind::HumeAi,
        client_config(VendorKind::HumeAi, server.uri()),
    )
    .unwrap();
    let pipeline = Pipeline::new(Arc::from(vendor), fast_config());

    let file = media_fixture();
    let err = pipeline.process(file.path()).await.unwrap_err();

    match err {
        PipelineError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_input_file_fails_without_touching_the_network() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the test would still
    // distinguish the error kind below.

    let vendor = client_for(
        VendorKind::HumeAi,
        client_config(VendorKind::HumeAi, server.uri()),
    )
    .unwrap();
    let pipeline = Pipeline::new(Arc::from(vendor), fast_config());

    let err = pipeline
        .process(Path::new("/nonexistent/audio.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Client(affect_client::ClientError::FileNotFound(_))
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
