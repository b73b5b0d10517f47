use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::backend::GenerationBackend;
use crate::config::AppConfig;
use crate::error::ReviewError;
use crate::executor::{DispatchOptions, Dispatcher};
use crate::review::{AggregateResult, AnalysisRequest, TaskSpec};

/// Builds the generation backend named by the configuration.
#[async_trait::async_trait]
pub trait BackendFactory: Send + Sync {
    async fn build_backend(&self, cfg: &AppConfig) -> anyhow::Result<Arc<dyn GenerationBackend>>;
}

/// Process-wide state: configuration plus the one shared backend client.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    backend: Arc<dyn GenerationBackend>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { cfg, backend }
    }

    pub async fn from_factory(
        cfg: AppConfig,
        factory: &dyn BackendFactory,
    ) -> anyhow::Result<Self> {
        let backend = factory.build_backend(&cfg).await?;
        Ok(Self::new(cfg, backend))
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn backend(&self) -> Arc<dyn GenerationBackend> {
        self.backend.clone()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.backend.clone(),
            DispatchOptions {
                max_output_tokens: self.cfg.backend.max_output_tokens,
                max_concurrency_ceiling: self.cfg.dispatch.max_concurrency_ceiling,
            },
        )
    }

    pub fn default_tasks(&self) -> &[TaskSpec] {
        &self.cfg.tasks
    }

    /// Run a full review of `request` and roll the results up.
    ///
    /// `tasks` falls back to the configured defaults when `None`.
    pub async fn review(
        &self,
        request: AnalysisRequest,
        tasks: Option<Vec<TaskSpec>>,
        max_concurrency: Option<usize>,
    ) -> Result<AggregateResult, ReviewError> {
        let request_id = Uuid::new_v4().to_string();
        let specs = tasks.unwrap_or_else(|| self.cfg.tasks.clone());
        let span = tracing::info_span!(
            "review",
            request_id = %request_id,
            file = %request.file_path,
            backend = self.backend.name()
        );

        async move {
            let report = self
                .dispatcher()
                .run_all_detailed(Arc::new(request), &specs, max_concurrency)
                .await?;
            let result = AggregateResult::from_report(request_id, report);
            tracing::info!(
                total_findings = result.total_findings,
                failed = result.failed_tasks.len(),
                "review finished"
            );
            Ok::<_, ReviewError>(result)
        }
        .instrument(span)
        .await
    }
}
