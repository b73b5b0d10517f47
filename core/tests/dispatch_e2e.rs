mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{empty_findings, sample_request, Reply, ScriptedBackend};
use diffscope_core::api::{
    AppConfig, AppContext, BackendErrorKind, DispatchOptions, Dispatcher, ReviewError, TaskSpec,
};

fn dispatcher(backend: Arc<ScriptedBackend>, ceiling: usize) -> Dispatcher {
    Dispatcher::new(
        backend,
        DispatchOptions {
            max_output_tokens: 1500,
            max_concurrency_ceiling: ceiling,
        },
    )
}

fn specs(n: usize) -> Vec<TaskSpec> {
    (0..n)
        .map(|i| {
            let class = if i % 2 == 0 { "security" } else { "quality" };
            TaskSpec::new(format!("task-{i}"), class, 0.3)
        })
        .collect()
}

#[tokio::test]
async fn security_and_quality_with_empty_replies() {
    let backend = ScriptedBackend::new(empty_findings()).shared();
    let specs = vec![
        TaskSpec::new("Security", "security", 0.2),
        TaskSpec::new("Quality", "quality", 0.3),
    ];

    let outcomes = dispatcher(backend.clone(), 8)
        .run_all(Arc::new(sample_request()), &specs, None)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.findings.is_empty()));
    assert!(outcomes.iter().all(|o| o.duration_secs >= 0.0));
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn one_failing_backend_call_drops_only_that_task() {
    let backend = ScriptedBackend::new(empty_findings())
        .when("security reviewer", Reply::Fail(BackendErrorKind::Timeout))
        .shared();
    let specs = vec![
        TaskSpec::new("Security", "security", 0.2),
        TaskSpec::new("Quality", "quality", 0.3),
        TaskSpec::new("Quality (strict)", "quality", 0.1),
    ];

    let report = dispatcher(backend, 8)
        .run_all_detailed(Arc::new(sample_request()), &specs, None)
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].task_name, "Security");
}

#[tokio::test]
async fn panicking_backend_is_isolated() {
    let backend = ScriptedBackend::new(empty_findings())
        .when("code quality", Reply::Panic)
        .shared();
    let specs = vec![
        TaskSpec::new("Security", "security", 0.2),
        TaskSpec::new("Quality", "quality", 0.3),
    ];

    let report = dispatcher(backend, 8)
        .run_all_detailed(Arc::new(sample_request()), &specs, None)
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].task_name, "Security");
    assert_eq!(report.failures[0].task_name, "Quality");
}

#[tokio::test]
async fn unknown_class_aborts_before_any_call() {
    let backend = ScriptedBackend::new(empty_findings()).shared();
    let mut specs = specs(3);
    specs.push(TaskSpec::new("Docs", "documentation", 0.3));

    let err = dispatcher(backend.clone(), 8)
        .run_all(Arc::new(sample_request()), &specs, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ReviewError::UnknownTaskClass(ref key) if key == "documentation"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn requested_concurrency_bounds_in_flight_calls() {
    let backend = ScriptedBackend::new(empty_findings())
        .with_delay(Duration::from_millis(25))
        .shared();

    let outcomes = dispatcher(backend.clone(), 8)
        .run_all(Arc::new(sample_request()), &specs(6), Some(2))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 6);
    assert!(backend.peak_in_flight() <= 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ceiling_caps_default_concurrency() {
    let backend = ScriptedBackend::new(empty_findings())
        .with_delay(Duration::from_millis(25))
        .shared();

    let outcomes = dispatcher(backend.clone(), 3)
        .run_all(Arc::new(sample_request()), &specs(9), None)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 9);
    assert!(backend.peak_in_flight() <= 3);
}

#[tokio::test]
async fn context_review_aggregates_failures() {
    let backend = ScriptedBackend::new(Reply::Text(
        include_str!("fixtures/fenced_findings.txt").to_string(),
    ))
    .when("code quality", Reply::Fail(BackendErrorKind::Status))
    .shared();
    let ctx = AppContext::new(AppConfig::default(), backend);

    let result = ctx.review(sample_request(), None, None).await.unwrap();

    assert_eq!(result.outcomes.len(), 1);
    assert_eq!(result.total_findings, 2);
    assert_eq!(result.failed_tasks, vec!["Quality".to_string()]);
    assert!(result.summary.contains("1 task failed: Quality"));
}
