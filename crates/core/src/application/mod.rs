// Application Layer - Lifecycle tracking components

pub mod attempt_registry;
pub mod cancel;
pub mod constants;
pub mod job_controller;
pub mod status_tracker;
pub mod termination;

// Re-exports
pub use attempt_registry::AttemptRegistry;
pub use cancel::{cancel_channel, CancelHandle, CancelToken};
pub use job_controller::{JobController, JobControllerConfig, JobStatusReport};
pub use status_tracker::StatusTracker;
pub use termination::spawn_termination_hook;
