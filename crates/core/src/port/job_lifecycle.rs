// Job Lifecycle Port (Interface)
// Capability set a job controller exposes to the scheduler, failure handling,
// cleanup and reporting paths.

use crate::domain::{AttemptId, AttemptRecord, JobId, JobStatus, JobType, VertexRef};
use async_trait::async_trait;
use std::sync::Arc;

/// Lifecycle operations of one job
///
/// Status-changing methods return `true` if the transition was applied and
/// `false` if it was absorbed because the job already reached a terminal
/// status. They never fail.
#[async_trait]
pub trait JobLifecycle: Send + Sync {
    fn job_id(&self) -> &JobId;

    fn job_name(&self) -> &str;

    fn job_type(&self) -> JobType;

    /// Current status (non-blocking read)
    fn status(&self) -> JobStatus;

    /// Epoch ms at which the job first entered `status`, 0 if it never did
    fn status_timestamp(&self, status: JobStatus) -> i64;

    /// Scheduler finished deploying: move to `RUNNING`
    fn transition_to_running(&self) -> bool;

    /// External cancel request: move to `CANCELLING`
    fn cancel(&self) -> bool;

    /// Failure detected: move to `FAILING`
    fn fail_job(&self, cause: &str) -> bool;

    /// Controller losing leadership or shutting down: move to `SUSPENDED`
    fn suspend(&self, cause: &str) -> bool;

    /// The job has fully terminated with `final_status`.
    ///
    /// # Panics
    /// If termination was already reported.
    fn complete_termination(&self, final_status: JobStatus) -> bool;

    /// Wait until termination is reported and return the final status
    async fn await_termination(&self) -> JobStatus;

    /// Register an execution attempt (overwrites an existing one with the same id)
    fn register_execution(&self, record: Arc<AttemptRecord>);

    fn find_execution(&self, attempt_id: &AttemptId) -> Option<Arc<AttemptRecord>>;

    fn find_vertex_with_attempt(&self, attempt_id: &AttemptId) -> Option<VertexRef>;

    /// Snapshot of all registered attempts
    fn registered_executions(&self) -> Vec<Arc<AttemptRecord>>;
}
