//! LaunchDarkly events API sink.
//!
//! Posts to `{events_uri}/bulk` using event schema 4: an `index` event
//! carrying the full context followed by the `custom` event that references
//! it through `contextKeys`. Every send is flushed immediately; there is no
//! batching and no retry.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};

use chaos_core::error::{ChaosError, Result};

use super::{MetricEvent, MetricsSink};

const EVENT_SCHEMA: &str = "4";
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

pub struct LaunchDarklySink {
    http: Client,
    sdk_key: String,
    bulk_url: String,
}

impl LaunchDarklySink {
    pub fn new(sdk_key: &str, events_uri: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(SEND_TIMEOUT)
            .user_agent(concat!("chaos-stub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChaosError::Metrics(format!("build http client failed: {e}")))?;

        Ok(Self {
            http,
            sdk_key: sdk_key.to_string(),
            bulk_url: format!("{}/bulk", events_uri.trim_end_matches('/')),
        })
    }

    pub fn bulk_url(&self) -> &str {
        &self.bulk_url
    }

    /// Wire payload for one event.
    pub fn payload(event: &MetricEvent) -> Value {
        let mut context_keys = Map::new();
        context_keys.insert(
            event.context.kind.clone(),
            Value::String(event.context.key.clone()),
        );

        json!([
            {
                "kind": "index",
                "creationDate": event.creation_date,
                "context": event.context,
            },
            {
                "kind": "custom",
                "creationDate": event.creation_date,
                "key": event.key,
                "contextKeys": context_keys,
                "data": { "service": event.service },
                "metricValue": event.metric_value,
            }
        ])
    }
}

impl fmt::Debug for LaunchDarklySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchDarklySink")
            .field("sdk_key", &redact(&self.sdk_key))
            .field("bulk_url", &self.bulk_url)
            .finish()
    }
}

#[async_trait]
impl MetricsSink for LaunchDarklySink {
    fn name(&self) -> &'static str {
        "launchdarkly"
    }

    async fn send(&self, event: MetricEvent) -> Result<()> {
        let resp = self
            .http
            .post(&self.bulk_url)
            .header("Authorization", &self.sdk_key)
            .header("X-LaunchDarkly-Event-Schema", EVENT_SCHEMA)
            .json(&Self::payload(&event))
            .send()
            .await
            .map_err(|e| ChaosError::Metrics(format!("post events failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChaosError::Metrics(format!("events endpoint returned {status}")));
        }
        tracing::debug!(event = event.key, context = %event.context.key, "metric flushed");
        Ok(())
    }
}

/// First 8 characters of the key, for logs.
pub fn redact(sdk_key: &str) -> String {
    let head: String = sdk_key.chars().take(8).collect();
    format!("{head}...")
}
