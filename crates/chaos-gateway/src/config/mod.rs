//! Service config loader (defaults + YAML overlay).
//!
//! The file is parsed as a raw YAML document, merged key-wise over the
//! built-in defaults, and only then deserialized into `ServiceConfig`. A
//! missing file is not an error: the defaults are served as-is.

pub mod env;
pub mod merge;
pub mod schema;

use std::{fs, io::ErrorKind, path::Path};

use serde_yaml::{Mapping, Value};
use chaos_core::error::{ChaosError, Result};

pub use env::RuntimeEnv;
pub use merge::merge_values;
pub use schema::{LatencySection, ServiceConfig};

pub const DEFAULT_CONFIG_PATH: &str = "blue.yaml";

/// Built-in defaults as a raw YAML document (merge base).
pub fn default_values() -> Value {
    let d = ServiceConfig::default();

    let mut latency = Mapping::new();
    latency.insert("min_ms".into(), d.latency.min_ms.into());
    latency.insert("max_ms".into(), d.latency.max_ms.into());

    let mut root = Mapping::new();
    root.insert("name".into(), d.name.into());
    root.insert("version".into(), d.version.into());
    root.insert("failure_rate".into(), d.failure_rate.into());
    root.insert("latency".into(), Value::Mapping(latency));
    Value::Mapping(root)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(ServiceConfig::default())
        }
        Err(e) => Err(ChaosError::Io(format!(
            "read config failed ({}): {e}",
            path.display()
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let file: Value = serde_yaml::from_str(s)
        .map_err(|e| ChaosError::InvalidConfig(format!("invalid yaml: {e}")))?;

    let file = match file {
        Value::Null => Value::Mapping(Default::default()),
        m @ Value::Mapping(_) => m,
        other => {
            return Err(ChaosError::InvalidConfig(format!(
                "config root must be a mapping, got {}",
                kind_of(&other)
            )))
        }
    };

    let merged = merge_values(file, default_values());
    serde_yaml::from_value(merged)
        .map_err(|e| ChaosError::InvalidConfig(format!("invalid config value: {e}")))
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
