// Termination hooks for cleanup and recovery paths
use crate::application::cancel::CancelToken;
use crate::domain::JobStatus;
use crate::port::JobLifecycle;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Run `hook` once the job terminates.
///
/// Spawns a task that waits for the job's completion signal and then calls
/// `hook` with the final status. If `cancel` fires first the hook is never
/// called and the task resolves to `None`.
///
/// # Example
/// ```text
/// let (cancel, token) = cancel_channel();
/// let watcher = spawn_termination_hook(controller.clone(), token, |status| {
///     release_slots(status);
/// });
/// ```
pub fn spawn_termination_hook<F>(
    lifecycle: Arc<dyn JobLifecycle>,
    mut cancel: CancelToken,
    hook: F,
) -> JoinHandle<Option<JobStatus>>
where
    F: FnOnce(JobStatus) + Send + 'static,
{
    tokio::spawn(async move {
        let job_id = lifecycle.job_id().clone();

        tokio::select! {
            status = lifecycle.await_termination() => {
                info!(job_id = %job_id, final_status = %status, "Running termination hook");
                hook(status);
                Some(status)
            }
            _ = cancel.cancelled() => {
                info!(job_id = %job_id, "Termination watch cancelled");
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cancel::cancel_channel;
    use crate::application::JobController;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_hook_runs_once_with_final_status() {
        let controller = Arc::new(JobController::with_defaults());
        let calls = Arc::new(AtomicUsize::new(0));
        let (_cancel, token) = cancel_channel();

        let hook_calls = Arc::clone(&calls);
        let watcher = spawn_termination_hook(controller.clone(), token, move |status| {
            assert_eq!(status, JobStatus::Canceled);
            hook_calls.fetch_add(1, Ordering::SeqCst);
        });

        controller.cancel();
        controller.complete_termination(JobStatus::Canceled);

        assert_eq!(watcher.await.unwrap(), Some(JobStatus::Canceled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_watch_skips_hook() {
        let controller = Arc::new(JobController::with_defaults());
        let calls = Arc::new(AtomicUsize::new(0));
        let (cancel, token) = cancel_channel();

        let hook_calls = Arc::clone(&calls);
        let watcher = spawn_termination_hook(controller.clone(), token, move |_| {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        });

        cancel.cancel();
        assert_eq!(watcher.await.unwrap(), None);

        controller.complete_termination(JobStatus::Finished);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
