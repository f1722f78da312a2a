// Domain Layer - Pure lifecycle types

pub mod attempt;
pub mod error;
pub mod job;
pub mod job_status;

// Re-exports
pub use attempt::{AttemptId, AttemptRecord, AttemptState, VertexRef};
pub use error::DomainError;
pub use job::{JobId, JobType};
pub use job_status::JobStatus;
