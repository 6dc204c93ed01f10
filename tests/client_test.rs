//! HTTP backend tests against a mock server

#![cfg(feature = "client")]

use std::time::Duration;

use serde_json::json;
use sweeplab::client::{ClientConfig, HttpBackend};
use sweeplab::dashboard::FailureKind;
use sweeplab::store::{ExperimentRunner, ExperimentStore};
use sweeplab::sweep::SweepForm;
use sweeplab::Error;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn experiment_json(id: &str) -> serde_json::Value {
    json!({
        "experiment_id": id,
        "name": "haiku-sweep",
        "prompt": "Write a haiku",
        "created_at": "2024-05-01T10:00:00Z",
        "response_count": 1,
        "responses": [{
            "text": "An old silent pond",
            "parameters": {"temperature": 0.1, "top_p": 0.9, "max_tokens": 500},
            "metrics": {
                "completeness": 0.9,
                "coherence": 0.8,
                "creativity": 0.7,
                "relevance": 0.6,
                "overall": 0.75
            }
        }]
    })
}

async fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&ClientConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_create_experiment_posts_expanded_ranges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/experiment"))
        .and(body_partial_json(json!({
            "prompt": "Write a haiku",
            "experiment_name": "haiku-sweep",
            "parameter_ranges": {"temperature": [0.1, 0.2], "top_p": [0.9, 1.0], "max_tokens": 500}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json("exp-1")))
        .expect(1)
        .mount(&server)
        .await;

    let request = SweepForm::new("Write a haiku", "haiku-sweep")
        .temperature(0.1, 0.2)
        .top_p(0.9, 1.0)
        .build_request()
        .unwrap();
    let experiment = backend(&server).await.create_experiment(&request).await.unwrap();

    assert_eq!(experiment.experiment_id(), "exp-1");
    assert_eq!(experiment.responses().len(), 1);
    assert!((experiment.responses()[0].metrics.overall - 0.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_backend_detail_is_passed_through_unmodified() {
    let server = MockServer::start().await;
    let detail = "Both OpenRouter and Anthropic failed: upstream 503";
    Mock::given(method("POST"))
        .and(path("/api/experiment"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": detail })))
        .mount(&server)
        .await;

    let request = SweepForm::new("p", "n").build_request().unwrap();
    let err = backend(&server).await.create_experiment(&request).await.unwrap_err();

    match &err {
        Error::Backend(message) => assert_eq!(message, detail),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), detail);
    assert_eq!(FailureKind::classify(&err.to_string()), FailureKind::AllProvidersFailed);
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway from proxy"))
        .mount(&server)
        .await;

    let err = backend(&server).await.list_experiments().await.unwrap_err();
    assert_eq!(err.to_string(), "Bad Gateway from proxy");
}

#[tokio::test]
async fn test_list_experiments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([experiment_json("b"), experiment_json("a")])),
        )
        .mount(&server)
        .await;

    let listed = backend(&server).await.list_experiments().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|e| e.experiment_id()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_get_unknown_experiment_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiment/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Experiment not found"})))
        .mount(&server)
        .await;

    let err = backend(&server).await.get_experiment("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn test_get_and_delete_experiment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiment/exp-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json("exp-9")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/experiment/exp-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server).await;
    let experiment = backend.get_experiment("exp-9").await.unwrap();
    assert_eq!(experiment.name(), "haiku-sweep");
    backend.delete_experiment("exp-9").await.unwrap();
}

#[tokio::test]
async fn test_performance_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_calls": 12,
            "cache_hits": 3,
            "cache_misses": 9,
            "avg_response_time": 1.5,
            "cache_hit_rate": 0.25
        })))
        .mount(&server)
        .await;

    let metrics = backend(&server).await.performance().await.unwrap();
    assert_eq!(metrics.api_calls, 12);
    assert_eq!(metrics.cache_lookups(), 12);
    assert!((metrics.cache_hit_rate - 0.25).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_timeout_becomes_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/experiments"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).timeout(Duration::from_millis(50));
    let err = HttpBackend::new(&config)
        .unwrap()
        .list_experiments()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Backend(_)));
    assert_eq!(FailureKind::classify(&err.to_string()), FailureKind::Timeout);
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let backend = HttpBackend::new(&ClientConfig::new("http://localhost:8000/")).unwrap();
    assert_eq!(backend.base_url(), "http://localhost:8000");
}
