use std::time::Instant;

use crate::backend::{GenerateRequest, GenerationBackend};
use crate::error::ReviewError;
use crate::normalize::normalize;
use crate::review::{AnalysisRequest, TaskOutcome, TaskSpec};

use super::registry::TaskClass;

/// Runs one review task: instructions → backend → normalizer → outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRunner {
    name: String,
    class: TaskClass,
    temperature: f32,
}

impl TaskRunner {
    pub fn new(spec: &TaskSpec, class: TaskClass) -> Self {
        Self {
            name: spec.name.clone(),
            class,
            temperature: spec.temperature,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> TaskClass {
        self.class
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// The elapsed time covers the backend call and normalization only.
    pub async fn run(
        &self,
        backend: &dyn GenerationBackend,
        request: &AnalysisRequest,
        max_output_tokens: u32,
    ) -> Result<TaskOutcome, ReviewError> {
        let strategy = self.class.instructions();
        let generate = GenerateRequest {
            system: strategy.system_prompt(),
            user: strategy.user_prompt(request),
            temperature: self.temperature,
            max_output_tokens,
        };

        tracing::info!(
            target: "diffscope.task",
            task = %self.name,
            class = %self.class,
            temperature = self.temperature,
            backend = backend.name(),
            "task started"
        );

        let started = Instant::now();
        let raw = backend
            .generate(generate)
            .await
            .map_err(|source| ReviewError::Backend {
                task: self.name.clone(),
                source,
            })?;
        let findings = normalize(&raw);
        let duration_secs = started.elapsed().as_secs_f64();

        tracing::info!(
            target: "diffscope.task",
            task = %self.name,
            findings = findings.len(),
            duration_secs,
            "task completed"
        );

        Ok(TaskOutcome {
            task_name: self.name.clone(),
            findings,
            duration_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, BackendErrorKind};
    use crate::review::Severity;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingBackend {
        reply: Result<String, BackendErrorKind>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    #[async_trait]
    impl GenerationBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(kind) => Err(BackendError::new(*kind, "stub failure")),
            }
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("main.go", "", "func f(d string) {}", "go")
    }

    #[tokio::test]
    async fn test_run_passes_spec_settings_to_backend() {
        let backend = RecordingBackend {
            reply: Ok(r#"{"findings": [{"severity": "low", "line_number": 1}]}"#.into()),
            seen: Mutex::new(Vec::new()),
        };
        let runner = TaskRunner::new(&TaskSpec::new("Quality", "quality", 0.3), TaskClass::Quality);

        let outcome = runner.run(&backend, &request(), 1500).await.unwrap();

        assert_eq!(outcome.task_name, "Quality");
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].severity, Severity::Low);
        assert!(outcome.duration_secs >= 0.0);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, 0.3);
        assert_eq!(seen[0].max_output_tokens, 1500);
        assert!(seen[0].user.contains("func f(d string) {}"));
        assert_eq!(
            seen[0].system,
            TaskClass::Quality.instructions().system_prompt()
        );
    }

    #[tokio::test]
    async fn test_run_wraps_backend_error_with_task_name() {
        let backend = RecordingBackend {
            reply: Err(BackendErrorKind::Timeout),
            seen: Mutex::new(Vec::new()),
        };
        let runner =
            TaskRunner::new(&TaskSpec::new("Security", "security", 0.1), TaskClass::Security);

        match runner.run(&backend, &request(), 100).await {
            Err(ReviewError::Backend { task, source }) => {
                assert_eq!(task, "Security");
                assert_eq!(source.kind(), BackendErrorKind::Timeout);
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
