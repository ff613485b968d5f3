//! Async task lifecycle tracking for background fetches

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Tasks currently running
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);

/// Ids handed to spawned tasks
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Arguments
///
/// * `name` - Task name for logging (e.g., "column_fetch")
/// * `future` - The async task to execute
///
/// # Returns
///
/// JoinHandle that can be awaited or detached
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() {
/// use board_client::debug::spawn_tracked;
///
/// let handle = spawn_tracked("column_fetch", async move { 42 });
/// assert_eq!(handle.await.unwrap(), 42);
/// # }
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::debug!(task = %name, task_id, "Task spawned");

    tokio::spawn(async move {
        let result = future.await;
        let duration = start.elapsed();

        tracing::debug!(
            task = %name,
            task_id,
            duration_ms = duration.as_millis(),
            "Task completed"
        );

        // A fetch this slow is past the client timeout
        if duration.as_secs() > 30 {
            tracing::warn!(
                task = %name,
                task_id,
                duration_ms = duration.as_millis(),
                "Task took very long (potential hang)"
            );
        }

        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_running_task_is_counted() {
        let (release, wait) = oneshot::channel::<()>();
        let (started, running) = oneshot::channel::<()>();

        let handle = spawn_tracked("blocked", async move {
            let _ = started.send(());
            let _ = wait.await;
            7
        });

        running.await.unwrap();
        // Other tests may run tracked tasks concurrently, so only a lower bound holds
        assert!(active_task_count() >= 1);

        release.send(()).unwrap();
        assert_eq!(handle.await.unwrap(), 7);
    }
}
