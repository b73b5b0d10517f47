use async_trait::async_trait;

use crate::error::BackendError;

/// One generation call: two instruction strings plus sampling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Text-in / text-out generation capability.
///
/// Implementations hold no per-request state and must be safe to share across
/// concurrently running review tasks.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError>;
}
