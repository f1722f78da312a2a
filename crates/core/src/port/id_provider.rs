// ID Provider Port (for deterministic testing)

use crate::domain::{AttemptId, JobId};

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique job ID
    fn generate_job_id(&self) -> JobId;

    /// Generate a new unique execution attempt ID
    fn generate_attempt_id(&self) -> AttemptId;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_job_id(&self) -> JobId {
        JobId::new(uuid::Uuid::new_v4().to_string())
    }

    fn generate_attempt_id(&self) -> AttemptId {
        AttemptId::new(uuid::Uuid::new_v4().to_string())
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Sequential IDs: job-1, attempt-2, ...
    #[derive(Default)]
    pub struct SequentialIdProvider {
        counter: AtomicU64,
    }

    impl SequentialIdProvider {
        pub fn new() -> Self {
            Self::default()
        }

        fn next(&self) -> u64 {
            self.counter.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    impl IdProvider for SequentialIdProvider {
        fn generate_job_id(&self) -> JobId {
            JobId::new(format!("job-{}", self.next()))
        }

        fn generate_attempt_id(&self) -> AttemptId {
            AttemptId::new(format!("attempt-{}", self.next()))
        }
    }
}
