//! # Bounded Worker Pool
//!
//! The fan-out/fan-in primitive every phase runs on. N independent units
//! of work go in, at most `limit` execute at once, and the call returns
//! only when every unit has produced a result or a failure. One unit
//! failing never cancels its siblings.

use std::future::Future;
use std::sync::Arc;

use sweepr_common::error::ToolError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

/// Runs every item through `op` with at most `limit` in flight.
///
/// Returns one `(item, outcome)` pair per input item. Completion order is
/// whatever the scheduler produced; callers must not read meaning into
/// it. The futures `op` builds are lazy, so the concurrency cap holds:
/// nothing runs until a semaphore permit is held.
pub async fn run_all<K, T, F, Fut>(
    items: Vec<K>,
    limit: usize,
    op: F,
) -> Vec<(K, Result<T, ToolError>)>
where
    K: Clone + Send + 'static,
    T: Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, ToolError>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut workers: JoinSet<(K, Result<T, ToolError>)> = JoinSet::new();

    for item in items {
        let semaphore = semaphore.clone();
        let work = op(item.clone());
        workers.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("pool semaphore closed");
            (item, work.await)
        });
    }

    let mut outcomes = Vec::with_capacity(workers.len());
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(pair) => outcomes.push(pair),
            // A panicking worker loses its pair; external invocations
            // return errors instead of panicking, so this is a bug trap.
            Err(e) => error!("worker panicked: {e}"),
        }
    }
    outcomes
}
