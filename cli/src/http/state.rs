//! HTTP server state

use diffscope_core::api::AppContext;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub stats: Arc<RwLock<ServerStats>>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx: Arc::new(ctx),
            stats: Arc::new(RwLock::new(ServerStats::new())),
        }
    }

    pub fn record_request(&self, endpoint: &str) {
        if let Ok(mut stats) = self.stats.write() {
            stats.record_request(endpoint);
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.record_error();
        }
    }

    /// Counters plus uptime; zeroed if the lock is poisoned.
    pub fn snapshot(&self) -> (f64, RequestCounters) {
        self.stats
            .read()
            .map(|stats| (stats.uptime_seconds(), stats.counters().clone()))
            .unwrap_or_default()
    }
}

/// Request counters reported by `/health`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RequestCounters {
    pub requests_total: u64,
    pub errors_total: u64,
    pub requests_by_endpoint: BTreeMap<String, u64>,
}

pub struct ServerStats {
    started: Instant,
    counters: RequestCounters,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            counters: RequestCounters::default(),
        }
    }

    pub fn record_request(&mut self, endpoint: &str) {
        let counters = &mut self.counters;
        counters.requests_total += 1;
        *counters
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_default() += 1;
    }

    pub fn record_error(&mut self) {
        self.counters.errors_total += 1;
    }

    pub fn counters(&self) -> &RequestCounters {
        &self.counters
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
