use std::sync::Arc;

use crate::backend::GenerationBackend;
use crate::error::ReviewError;
use crate::review::{AnalysisRequest, DispatchReport, TaskFailure, TaskOutcome, TaskSpec};
use crate::task::build_runner;

use super::scheduler::execute_bounded;

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;

/// Default upper bound on concurrently running tasks: `max(4, 2 × CPUs)`.
pub fn default_concurrency_ceiling() -> usize {
    (num_cpus::get() * 2).max(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    pub max_output_tokens: u32,
    pub max_concurrency_ceiling: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_concurrency_ceiling: default_concurrency_ceiling(),
        }
    }
}

/// Fans one analysis request out to a set of review tasks and collects what finishes.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn GenerationBackend>,
    options: DispatchOptions,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn GenerationBackend>, options: DispatchOptions) -> Self {
        Self { backend, options }
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Permits for a batch of `spec_count` tasks.
    pub fn effective_concurrency(&self, spec_count: usize, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(spec_count)
            .min(self.options.max_concurrency_ceiling)
            .max(1)
    }

    /// Run every spec and return the outcomes of the tasks that completed.
    pub async fn run_all(
        &self,
        request: Arc<AnalysisRequest>,
        specs: &[TaskSpec],
        max_concurrency: Option<usize>,
    ) -> Result<Vec<TaskOutcome>, ReviewError> {
        Ok(self
            .run_all_detailed(request, specs, max_concurrency)
            .await?
            .outcomes)
    }

    /// Like [`Dispatcher::run_all`], but also reports the tasks that were dropped.
    ///
    /// Every spec is resolved before anything is spawned, so an unknown task
    /// class fails the whole call without touching the backend.
    pub async fn run_all_detailed(
        &self,
        request: Arc<AnalysisRequest>,
        specs: &[TaskSpec],
        max_concurrency: Option<usize>,
    ) -> Result<DispatchReport, ReviewError> {
        let runners = specs
            .iter()
            .map(build_runner)
            .collect::<Result<Vec<_>, _>>()?;

        if runners.is_empty() {
            return Ok(DispatchReport::default());
        }

        let permits = self.effective_concurrency(runners.len(), max_concurrency);
        tracing::debug!(
            target: "diffscope.task",
            file = %request.file_path,
            tasks = runners.len(),
            permits,
            "dispatching review tasks"
        );

        let max_output_tokens = self.options.max_output_tokens;
        let jobs = runners
            .into_iter()
            .map(|runner| {
                let backend = self.backend.clone();
                let request = request.clone();
                let name = runner.name().to_string();
                let job = async move {
                    runner
                        .run(backend.as_ref(), &request, max_output_tokens)
                        .await
                };
                (name, job)
            })
            .collect();

        let mut report = DispatchReport::default();
        for (name, res) in execute_bounded(jobs, permits).await {
            match res {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!(
                        target: "diffscope.task",
                        task = %name,
                        error = %e,
                        "task failed; omitting from outcomes"
                    );
                    report.failures.push(TaskFailure {
                        task_name: name,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
