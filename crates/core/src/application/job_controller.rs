// Job controller - composes status tracking and the attempt registry
use crate::application::attempt_registry::AttemptRegistry;
use crate::application::constants::{DEFAULT_JOB_NAME, DEFAULT_JOB_TYPE};
use crate::application::status_tracker::StatusTracker;
use crate::domain::{AttemptId, AttemptRecord, JobId, JobStatus, JobType, VertexRef};
use crate::error::{AppError, Result};
use crate::port::id_provider::UuidProvider;
use crate::port::time_provider::SystemTimeProvider;
use crate::port::{IdProvider, JobLifecycle, TimeProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Job controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobControllerConfig {
    pub job_name: String,
    pub job_type: JobType,
}

impl Default for JobControllerConfig {
    fn default() -> Self {
        Self {
            job_name: DEFAULT_JOB_NAME.to_string(),
            job_type: DEFAULT_JOB_TYPE,
        }
    }
}

impl JobControllerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.job_name.trim().is_empty() {
            return Err(AppError::Config("job_name cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Point-in-time view of a job for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusReport {
    pub job_id: JobId,
    pub job_name: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub terminal: bool,
    pub attempts: usize,
    pub status_timestamps: BTreeMap<JobStatus, i64>,
}

impl JobStatusReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Lifecycle state of one job.
///
/// Owns exactly one [`StatusTracker`] and one [`AttemptRegistry`]; the two
/// share nothing and are only combined here.
pub struct JobController {
    job_id: JobId,
    job_name: String,
    job_type: JobType,
    tracker: StatusTracker,
    registry: AttemptRegistry,
}

impl JobController {
    /// Create a controller in `INITIALIZING`
    ///
    /// # Errors
    /// `AppError::Config` if the configuration is invalid
    pub fn new(
        config: JobControllerConfig,
        id_provider: &dyn IdProvider,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, id_provider.generate_job_id(), time_provider))
    }

    /// Controller with default configuration, UUID job ID and the system clock
    pub fn with_defaults() -> Self {
        Self::build(
            JobControllerConfig::default(),
            UuidProvider.generate_job_id(),
            Arc::new(SystemTimeProvider),
        )
    }

    fn build(
        config: JobControllerConfig,
        job_id: JobId,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        info!(
            job_id = %job_id,
            job_name = %config.job_name,
            job_type = %config.job_type,
            "Job controller created"
        );

        Self {
            job_id,
            job_name: config.job_name,
            job_type: config.job_type,
            tracker: StatusTracker::with_time_provider(time_provider),
            registry: AttemptRegistry::new(),
        }
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &AttemptRegistry {
        &self.registry
    }

    pub fn report(&self) -> JobStatusReport {
        let (status, status_timestamps) = self.tracker.status_with_timestamps();
        JobStatusReport {
            job_id: self.job_id.clone(),
            job_name: self.job_name.clone(),
            job_type: self.job_type,
            status,
            terminal: status.is_terminal(),
            attempts: self.registry.len(),
            status_timestamps,
        }
    }

    fn transition(&self, target: JobStatus, reason: &str) -> bool {
        let applied = self.tracker.request_transition(target);
        if applied {
            info!(job_id = %self.job_id, status = %target, reason, "Job status changed");
        }
        applied
    }
}

#[async_trait]
impl JobLifecycle for JobController {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    fn job_name(&self) -> &str {
        &self.job_name
    }

    fn job_type(&self) -> JobType {
        self.job_type
    }

    fn status(&self) -> JobStatus {
        self.tracker.status()
    }

    fn status_timestamp(&self, status: JobStatus) -> i64 {
        self.tracker.status_timestamp(status)
    }

    fn transition_to_running(&self) -> bool {
        self.transition(JobStatus::Running, "deployed")
    }

    fn cancel(&self) -> bool {
        self.transition(JobStatus::Cancelling, "cancel requested")
    }

    fn fail_job(&self, cause: &str) -> bool {
        warn!(job_id = %self.job_id, cause, "Job failure reported");
        self.transition(JobStatus::Failing, cause)
    }

    fn suspend(&self, cause: &str) -> bool {
        self.transition(JobStatus::Suspended, cause)
    }

    fn complete_termination(&self, final_status: JobStatus) -> bool {
        info!(job_id = %self.job_id, final_status = %final_status, "Job terminated");
        self.tracker.complete_with(final_status)
    }

    async fn await_termination(&self) -> JobStatus {
        self.tracker.await_completion().await
    }

    fn register_execution(&self, record: Arc<AttemptRecord>) {
        self.registry.register(record);
    }

    fn find_execution(&self, attempt_id: &AttemptId) -> Option<Arc<AttemptRecord>> {
        self.registry.find(attempt_id)
    }

    fn find_vertex_with_attempt(&self, attempt_id: &AttemptId) -> Option<VertexRef> {
        self.registry.find_vertex_for_attempt(attempt_id)
    }

    fn registered_executions(&self) -> Vec<Arc<AttemptRecord>> {
        self.registry.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    fn new_controller() -> (JobController, Arc<FixedTimeProvider>) {
        let clock = Arc::new(FixedTimeProvider::new(100));
        let controller = JobController::new(
            JobControllerConfig {
                job_name: "word-count".to_string(),
                job_type: JobType::Batch,
            },
            &SequentialIdProvider::new(),
            clock.clone(),
        )
        .unwrap();
        (controller, clock)
    }

    #[test]
    fn test_identity_comes_from_config_and_provider() {
        let (controller, _) = new_controller();
        assert_eq!(controller.job_id().as_str(), "job-1");
        assert_eq!(controller.job_name(), "word-count");
        assert_eq!(controller.job_type(), JobType::Batch);
        assert_eq!(controller.status(), JobStatus::Initializing);
    }

    #[test]
    fn test_empty_job_name_is_rejected() {
        let config = JobControllerConfig {
            job_name: "  ".to_string(),
            ..Default::default()
        };
        let result = JobController::new(config, &UuidProvider, Arc::new(SystemTimeProvider));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: JobControllerConfig = serde_json::from_str(r#"{"job_type":"BATCH"}"#).unwrap();
        assert_eq!(config.job_name, DEFAULT_JOB_NAME);
        assert_eq!(config.job_type, JobType::Batch);
    }

    #[test]
    fn test_lifecycle_operations_map_to_statuses() {
        let (controller, _) = new_controller();

        assert!(controller.transition_to_running());
        assert_eq!(controller.status(), JobStatus::Running);

        assert!(controller.fail_job("task manager lost"));
        assert_eq!(controller.status(), JobStatus::Failing);

        assert!(controller.cancel());
        assert_eq!(controller.status(), JobStatus::Cancelling);

        assert!(controller.suspend("leadership revoked"));
        assert_eq!(controller.status(), JobStatus::Suspended);

        assert!(!controller.transition_to_running());
        assert!(!controller.cancel());
        assert!(!controller.fail_job("late failure"));
        assert_eq!(controller.status(), JobStatus::Suspended);
    }

    #[tokio::test]
    async fn test_complete_termination_releases_awaiters() {
        let (controller, _) = new_controller();
        controller.transition_to_running();

        assert!(controller.complete_termination(JobStatus::Finished));
        assert_eq!(controller.await_termination().await, JobStatus::Finished);
        assert_eq!(controller.status(), JobStatus::Finished);
    }

    #[test]
    fn test_executions_delegate_to_registry() {
        let (controller, _) = new_controller();
        let record = Arc::new(AttemptRecord::new(
            AttemptId::new("A1"),
            VertexRef::new("map"),
        ));
        controller.register_execution(record);

        assert!(controller.find_execution(&AttemptId::new("A1")).is_some());
        assert_eq!(
            controller.find_vertex_with_attempt(&AttemptId::new("A1")),
            Some(VertexRef::new("map"))
        );
        assert_eq!(controller.find_vertex_with_attempt(&AttemptId::new("A9")), None);
        assert_eq!(controller.registered_executions().len(), 1);
    }

    #[test]
    fn test_report_reflects_current_state() {
        let (controller, clock) = new_controller();
        clock.advance(50);
        controller.transition_to_running();
        controller.register_execution(Arc::new(AttemptRecord::new(
            AttemptId::new("A1"),
            VertexRef::new("map"),
        )));

        let report = controller.report();
        assert_eq!(report.status, JobStatus::Running);
        assert!(!report.terminal);
        assert_eq!(report.attempts, 1);
        assert_eq!(report.status_timestamps.get(&JobStatus::Initializing), Some(&100));
        assert_eq!(report.status_timestamps.get(&JobStatus::Running), Some(&150));
        assert_eq!(controller.status_timestamp(JobStatus::Running), 150);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "RUNNING");
        assert_eq!(json["job_type"], "BATCH");
        assert_eq!(json["status_timestamps"]["RUNNING"], 150);
    }
}
