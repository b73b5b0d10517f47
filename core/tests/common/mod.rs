#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diffscope_core::api::{
    AnalysisRequest, BackendError, BackendErrorKind, GenerateRequest, GenerationBackend,
};

/// How a [`ScriptedBackend`] answers a call.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Fail(BackendErrorKind),
    Panic,
}

/// Answers by matching a marker in the system instructions; falls back to `default`.
pub struct ScriptedBackend {
    rules: Vec<(&'static str, Reply)>,
    default: Reply,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(default: Reply) -> Self {
        Self {
            rules: Vec::new(),
            default,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn when(mut self, marker: &'static str, reply: Reply) -> Self {
        self.rules.push((marker, reply));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let reply = self
            .rules
            .iter()
            .find(|(marker, _)| request.system.contains(marker))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default.clone());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(kind) => Err(BackendError::new(kind, "scripted failure")),
            Reply::Panic => panic!("scripted panic"),
        }
    }
}

pub fn empty_findings() -> Reply {
    Reply::Text(r#"{"findings": []}"#.to_string())
}

pub fn sample_request() -> AnalysisRequest {
    AnalysisRequest::new(
        "handlers/user.go",
        "func GetUser(id string) {}",
        "func GetUser(id string) {\n\tdb.Query(\"SELECT * FROM users WHERE id = \" + id)\n}",
        "go",
    )
}
