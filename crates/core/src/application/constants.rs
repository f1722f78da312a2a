// Lifecycle constants (ADR: No magic values)
use crate::domain::{JobStatus, JobType};

/// Job name used when the owner does not configure one
pub const DEFAULT_JOB_NAME: &str = "job";

/// Job type used when the owner does not configure one
pub const DEFAULT_JOB_TYPE: JobType = JobType::Streaming;

/// Status every tracker starts in
pub const INITIAL_STATUS: JobStatus = JobStatus::Initializing;

/// Timestamp reported for a status the job never entered
pub const UNSET_STATUS_TIMESTAMP: i64 = 0;
