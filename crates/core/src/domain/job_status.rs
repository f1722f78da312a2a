// Job Status Domain Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Lifecycle status of a job.
///
/// Terminal statuses (`CANCELED`, `FAILED`, `FINISHED`, `SUSPENDED`) are
/// absorbing: once a tracker reaches one of them it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Initializing,
    Running,
    Cancelling,
    Canceled,
    Failing,
    Failed,
    Finished,
    Suspended,
    Reconciling,
    Restarting,
}

impl JobStatus {
    /// Every status, in declaration order
    pub const ALL: [JobStatus; 10] = [
        JobStatus::Initializing,
        JobStatus::Running,
        JobStatus::Cancelling,
        JobStatus::Canceled,
        JobStatus::Failing,
        JobStatus::Failed,
        JobStatus::Finished,
        JobStatus::Suspended,
        JobStatus::Reconciling,
        JobStatus::Restarting,
    ];

    /// True for statuses with no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Canceled | JobStatus::Failed | JobStatus::Finished | JobStatus::Suspended
        )
    }

    /// True for terminal statuses that end the job cluster-wide.
    ///
    /// `SUSPENDED` is terminal for this controller only: another controller
    /// may pick the job up again later.
    pub fn is_globally_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Canceled | JobStatus::Failed | JobStatus::Finished
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Initializing => "INITIALIZING",
            JobStatus::Running => "RUNNING",
            JobStatus::Cancelling => "CANCELLING",
            JobStatus::Canceled => "CANCELED",
            JobStatus::Failing => "FAILING",
            JobStatus::Failed => "FAILED",
            JobStatus::Finished => "FINISHED",
            JobStatus::Suspended => "SUSPENDED",
            JobStatus::Reconciling => "RECONCILING",
            JobStatus::Restarting => "RESTARTING",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_partition() {
        let terminal: Vec<JobStatus> = JobStatus::ALL
            .into_iter()
            .filter(JobStatus::is_terminal)
            .collect();

        assert_eq!(
            terminal,
            vec![
                JobStatus::Canceled,
                JobStatus::Failed,
                JobStatus::Finished,
                JobStatus::Suspended
            ]
        );
    }

    #[test]
    fn test_suspended_is_not_globally_terminal() {
        assert!(JobStatus::Suspended.is_terminal());
        assert!(!JobStatus::Suspended.is_globally_terminal());
        assert!(JobStatus::Finished.is_globally_terminal());
        assert!(!JobStatus::Failing.is_globally_terminal());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("running".parse::<JobStatus>().unwrap(), JobStatus::Running);
        assert_eq!(
            " CANCELLING ".parse::<JobStatus>().unwrap(),
            JobStatus::Cancelling
        );
    }

    #[test]
    fn test_parse_unknown_status() {
        let err = "DONE".parse::<JobStatus>().unwrap_err();
        assert!(err.to_string().contains("DONE"));
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&JobStatus::Reconciling).unwrap();
        assert_eq!(json, "\"RECONCILING\"");

        let status: JobStatus = serde_json::from_str("\"RESTARTING\"").unwrap();
        assert_eq!(status, JobStatus::Restarting);
    }

    #[test]
    fn test_display_matches_serde_name() {
        for status in JobStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.to_string());
        }
    }
}
