use serde::{Deserialize, Deserializer};

use chaos_core::FaultProfile;

/// Effective service config, after the file has been merged over defaults.
///
/// Keys the service does not know are ignored so one YAML file can be shared
/// with other tooling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_name", deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default = "default_version", deserialize_with = "scalar_string")]
    pub version: String,

    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,

    #[serde(default)]
    pub latency: LatencySection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            failure_rate: default_failure_rate(),
            latency: LatencySection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn fault_profile(&self) -> FaultProfile {
        FaultProfile::new(self.failure_rate, self.latency.min_ms, self.latency.max_ms)
    }
}

/// Latency bounds in millis. Negative values are accepted and mean no delay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatencySection {
    #[serde(default = "default_min_ms")]
    pub min_ms: i64,

    #[serde(default = "default_max_ms")]
    pub max_ms: i64,
}

impl Default for LatencySection {
    fn default() -> Self {
        Self {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_name() -> String {
    "service-name".into()
}
fn default_version() -> String {
    "1.0.0".into()
}
fn default_failure_rate() -> f64 {
    0.5
}
fn default_min_ms() -> i64 {
    30
}
fn default_max_ms() -> i64 {
    60
}

/// Identity fields are echoed back verbatim, so an unquoted `version: 2.0`
/// is kept as its YAML spelling rather than rejected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn scalar_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(d)? {
        Scalar::Str(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => format!("{f:?}"),
        Scalar::Bool(b) => b.to_string(),
    })
}
