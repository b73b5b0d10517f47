//! BackendFactory implementation: builds the configured backend for the CLI and HTTP server.
use std::sync::Arc;

use async_trait::async_trait;
use diffscope_core::api::{AppConfig, BackendFactory, GenerationBackend};

use crate::factory;

#[derive(Default)]
pub struct PluginBackendFactory;

#[async_trait]
impl BackendFactory for PluginBackendFactory {
    async fn build_backend(&self, cfg: &AppConfig) -> anyhow::Result<Arc<dyn GenerationBackend>> {
        factory::build_backend(&cfg.backend)
    }
}
