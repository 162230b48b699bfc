//! Process environment, read once at startup.

use std::{fs, path::PathBuf};

use chaos_core::error::{ChaosError, Result};

use super::DEFAULT_CONFIG_PATH;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_EVENTS_URI: &str = "https://events.launchdarkly.com";

/// Environment-derived settings. Built through a lookup function so tests
/// never read or mutate the real process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub config_path: PathBuf,
    pub port: u16,
    pub sdk_key: Option<String>,
    pub events_uri: String,
}

impl RuntimeEnv {
    pub fn from_process() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map_err(|e| ChaosError::InvalidConfig(format!("PORT must be a port number: {e}")))?,
            None => DEFAULT_PORT,
        };

        // key file wins over the inline key
        let sdk_key = match lookup("LAUNCHDARKLY_SDK_KEY_FILE") {
            Some(path) => {
                let raw = fs::read_to_string(&path).map_err(|e| {
                    ChaosError::Io(format!("read LAUNCHDARKLY_SDK_KEY_FILE ({path}) failed: {e}"))
                })?;
                Some(raw.trim().to_string())
            }
            None => lookup("LAUNCHDARKLY_SDK_KEY"),
        }
        .filter(|k| !k.is_empty());

        let events_uri = lookup("LAUNCHDARKLY_EVENTS_URI")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_EVENTS_URI.to_string());

        Ok(Self { config_path, port, sdk_key, events_uri })
    }
}
