#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use chaos_gateway::{
    app_state::AppState,
    config::{LatencySection, ServiceConfig},
    reporter::{LaunchDarklySink, MetricEvent, MetricsSink, Reporter},
    router::build_router,
};

#[derive(Clone)]
struct Capture {
    calls: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    reply: StatusCode,
}

async fn bulk(State(c): State<Capture>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    c.calls.lock().await.push((headers, body));
    c.reply
}

/// Local stand-in for the events endpoint. Returns its base URI.
async fn spawn_capture(reply: StatusCode) -> (String, Capture) {
    let capture = Capture { calls: Arc::default(), reply };
    let app = Router::new()
        .route("/bulk", post(bulk))
        .with_state(capture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), capture)
}

async fn wait_for_calls(c: &Capture, n: usize) -> Vec<(HeaderMap, Value)> {
    for _ in 0..100 {
        {
            let calls = c.calls.lock().await;
            if calls.len() >= n {
                return calls.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {n} calls to the events endpoint");
}

#[tokio::test]
async fn send_posts_schema4_payload_with_auth() {
    let (uri, capture) = spawn_capture(StatusCode::ACCEPTED).await;
    let sink = LaunchDarklySink::new("sdk-test-key", &uri).unwrap();

    sink.send(MetricEvent::http_error(Some("req-9"), "blue")).await.unwrap();

    let calls = wait_for_calls(&capture, 1).await;
    let (headers, body) = &calls[0];
    assert_eq!(headers["authorization"], "sdk-test-key");
    assert_eq!(headers["x-launchdarkly-event-schema"], "4");
    assert!(headers["user-agent"].to_str().unwrap().starts_with("chaos-stub/"));

    assert_eq!(body[0]["kind"], "index");
    assert_eq!(body[0]["context"]["key"], "req-9");
    assert_eq!(body[1]["kind"], "custom");
    assert_eq!(body[1]["key"], "http-errors");
    assert_eq!(body[1]["contextKeys"]["request"], "req-9");
    assert_eq!(body[1]["metricValue"], 1.0);
}

#[tokio::test]
async fn rejected_post_is_a_metrics_error() {
    let (uri, _capture) = spawn_capture(StatusCode::UNAUTHORIZED).await;
    let sink = LaunchDarklySink::new("sdk-bad", &uri).unwrap();

    let err = sink
        .send(MetricEvent::http_error(None, "blue"))
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "METRICS");
}

#[tokio::test]
async fn unreachable_backend_is_a_metrics_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = LaunchDarklySink::new("sdk-key", &format!("http://{addr}")).unwrap();
    let err = sink
        .send(MetricEvent::http_error(None, "blue"))
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "METRICS");
}

#[tokio::test]
async fn stub_failure_reaches_the_events_endpoint() {
    let (uri, capture) = spawn_capture(StatusCode::ACCEPTED).await;
    let cfg = ServiceConfig {
        name: "green".into(),
        version: "0.0.1".into(),
        failure_rate: 1.0,
        latency: LatencySection { min_ms: 0, max_ms: 0 },
    };
    let sink = LaunchDarklySink::new("sdk-e2e", &uri).unwrap();
    let app = build_router(AppState::new(cfg, Reporter::new("green", Arc::new(sink))));

    let req = Request::builder()
        .uri("/checkout")
        .header("X-LD-Request-Id", "req-e2e")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let calls = wait_for_calls(&capture, 1).await;
    let (_, body) = &calls[0];
    assert_eq!(body[0]["context"]["service"], "green");
    assert_eq!(body[1]["data"]["service"], "green");
    assert_eq!(body[1]["contextKeys"]["request"], "req-e2e");
}

#[tokio::test]
async fn backend_outage_never_reaches_the_caller() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cfg = ServiceConfig {
        failure_rate: 1.0,
        latency: LatencySection { min_ms: 0, max_ms: 0 },
        ..ServiceConfig::default()
    };
    let sink = LaunchDarklySink::new("sdk-down", &format!("http://{addr}")).unwrap();
    let app = build_router(AppState::new(cfg, Reporter::new("service-name", Arc::new(sink))));

    let resp = app
        .oneshot(Request::builder().uri("/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
