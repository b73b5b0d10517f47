use std::sync::Arc;

use anyhow::Result;

use diffscope_core::api::{BackendConfig, BackendKind, GenerationBackend};

use crate::backend::{AiServiceBackend, OllamaBackend};

pub fn build_backend(cfg: &BackendConfig) -> Result<Arc<dyn GenerationBackend>> {
    tracing::debug!(
        target: "diffscope.backend",
        kind = %cfg.kind,
        base_url = %cfg.base_url,
        model = %cfg.model,
        timeout_ms = cfg.timeout_ms,
        "building generation backend"
    );

    match cfg.kind {
        BackendKind::Ollama => Ok(Arc::new(OllamaBackend::new(
            &cfg.base_url,
            cfg.model.clone(),
            cfg.api_key.clone(),
            cfg.timeout_ms,
        )?)),
        BackendKind::AiService => Ok(Arc::new(AiServiceBackend::new(
            &cfg.base_url,
            cfg.model.clone(),
            cfg.api_key.clone(),
            cfg.timeout_ms,
        )?)),
    }
}
