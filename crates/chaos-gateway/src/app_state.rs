//! Shared application state for the chaos gateway.
//!
//! Everything here is fixed at startup. Handlers clone the state per request
//! (two `Arc` bumps) and only ever read from it.

use std::sync::Arc;

use chaos_core::FaultProfile;

use crate::config::ServiceConfig;
use crate::reporter::Reporter;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    reporter: Reporter,
}

struct AppStateInner {
    cfg: ServiceConfig,
    faults: FaultProfile,
}

impl AppState {
    pub fn new(cfg: ServiceConfig, reporter: Reporter) -> Self {
        let faults = cfg.fault_profile();
        Self {
            inner: Arc::new(AppStateInner { cfg, faults }),
            reporter,
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn faults(&self) -> &FaultProfile {
        &self.inner.faults
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }
}
