use std::future::Future;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use crate::error::ReviewError;

/// Execute named jobs in parallel, at most `max_concurrency` at a time.
///
/// # Arguments
///
/// * `jobs` - `(name, future)` pairs; each future is spawned onto the runtime
/// * `max_concurrency` - Maximum number of jobs holding a permit (clamped to at least 1)
///
/// # Returns
///
/// One `(name, result)` pair per job, in completion order. A job whose spawned
/// task panics is reported as [`ReviewError::TaskAborted`]; other jobs are
/// unaffected.
pub async fn execute_bounded<T, Fut>(
    jobs: Vec<(String, Fut)>,
    max_concurrency: usize,
) -> Vec<(String, Result<T, ReviewError>)>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ReviewError>> + Send + 'static,
{
    let sem = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for (name, job) in jobs {
        let sem = sem.clone();
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            let _permit =
                sem.acquire_owned()
                    .await
                    .map_err(|_| ReviewError::TaskAborted {
                        task: task_name,
                        detail: "semaphore closed unexpectedly".into(),
                    })?;

            job.await
        });

        futs.push(async move {
            let res = match handle.await {
                Ok(res) => res,
                Err(e) => Err(ReviewError::TaskAborted {
                    task: name.clone(),
                    detail: join_error_detail(&e),
                }),
            };
            (name, res)
        });
    }

    let mut results = Vec::with_capacity(futs.len());
    while let Some(item) = futs.next().await {
        results.push(item);
    }
    results
}

fn join_error_detail(e: &JoinError) -> String {
    if e.is_panic() {
        "task panicked".to_string()
    } else {
        e.to_string()
    }
}
