// Domain Error Types

use thiserror::Error;

use crate::domain::JobStatus;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown job status: {0}")]
    UnknownStatus(String),

    #[error("Completion already resolved with {existing}, cannot resolve again with {attempted}")]
    CompletionAlreadyResolved {
        existing: JobStatus,
        attempted: JobStatus,
    },
}

pub type Result<T> = std::result::Result<T, DomainError>;
