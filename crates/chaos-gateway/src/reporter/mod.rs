//! Error-metric reporting.
//!
//! `Reporter` is the handle the request path talks to. It decides whether a
//! request produces an event at all (only synthetic failures do), builds the
//! event, and hands it to a `MetricsSink` on a detached task. Sink failures
//! are logged here and never reach the HTTP caller.

pub mod launchdarkly;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::Serialize;

use chaos_core::error::Result;
use chaos_core::Outcome;

use crate::config::RuntimeEnv;

pub use launchdarkly::LaunchDarklySink;

/// Event key tracked for every synthetic failure.
pub const ERROR_EVENT_KEY: &str = "http-errors";

/// Context key used when the caller sent no request id.
pub const FALLBACK_CONTEXT_KEY: &str = "service-metrics";

/// Evaluation context attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalContext {
    pub kind: String,
    pub key: String,
    pub service: String,
}

impl EvalContext {
    /// `request` context keyed by the correlation id, or the shared
    /// `service-metrics` user context when there is none.
    pub fn for_request(request_id: Option<&str>, service: &str) -> Self {
        match request_id.filter(|id| !id.is_empty()) {
            Some(id) => Self {
                kind: "request".into(),
                key: id.into(),
                service: service.into(),
            },
            None => Self {
                kind: "user".into(),
                key: FALLBACK_CONTEXT_KEY.into(),
                service: service.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvent {
    pub key: &'static str,
    pub context: EvalContext,
    pub service: String,
    pub metric_value: f64,
    /// Unix epoch millis.
    pub creation_date: u64,
}

impl MetricEvent {
    pub fn http_error(request_id: Option<&str>, service: &str) -> Self {
        Self {
            key: ERROR_EVENT_KEY,
            context: EvalContext::for_request(request_id, service),
            service: service.into(),
            metric_value: 1.0,
            creation_date: now_millis(),
        }
    }
}

/// Destination for metric events.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, event: MetricEvent) -> Result<()>;
}

#[derive(Clone)]
pub struct Reporter {
    service: Arc<str>,
    sink: Option<Arc<dyn MetricsSink>>,
}

impl Reporter {
    pub fn new(service: &str, sink: Arc<dyn MetricsSink>) -> Self {
        Self { service: service.into(), sink: Some(sink) }
    }

    pub fn disabled(service: &str) -> Self {
        Self { service: service.into(), sink: None }
    }

    /// LaunchDarkly-backed reporter when an SDK key is configured.
    pub fn from_env(env: &RuntimeEnv, service: &str) -> Result<Self> {
        match env.sdk_key.as_deref() {
            Some(key) => {
                let sink = LaunchDarklySink::new(key, &env.events_uri)?;
                tracing::info!(
                    sdk_key = %launchdarkly::redact(key),
                    events_uri = %env.events_uri,
                    "LaunchDarkly metrics enabled"
                );
                Ok(Self::new(service, Arc::new(sink)))
            }
            None => {
                tracing::warn!("LAUNCHDARKLY_SDK_KEY not set, LaunchDarkly metrics disabled");
                Ok(Self::disabled(service))
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record the outcome of one stub request. Success sends nothing.
    pub fn report(&self, outcome: Outcome, request_id: Option<&str>) {
        if !outcome.is_failure() {
            return;
        }
        let Some(sink) = self.sink.clone() else {
            return;
        };

        let event = MetricEvent::http_error(request_id, &self.service);
        tokio::spawn(async move {
            let key = event.key;
            if let Err(e) = sink.send(event).await {
                tracing::warn!(sink = sink.name(), event = key, error = %e, "metric delivery failed");
            }
        });
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
