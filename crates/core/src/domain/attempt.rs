// Execution Attempt Domain Model

use serde::{Deserialize, Serialize};

/// Identifier of one execution attempt (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(String);

impl AttemptId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the logical task (vertex) an attempt belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexRef(String);

impl VertexRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VertexRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Execution state of a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptState {
    #[default]
    Created,
    Scheduled,
    Deploying,
    Initializing,
    Running,
    Finished,
    Canceling,
    Canceled,
    Failed,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptState::Finished | AttemptState::Canceled | AttemptState::Failed
        )
    }
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptState::Created => write!(f, "CREATED"),
            AttemptState::Scheduled => write!(f, "SCHEDULED"),
            AttemptState::Deploying => write!(f, "DEPLOYING"),
            AttemptState::Initializing => write!(f, "INITIALIZING"),
            AttemptState::Running => write!(f, "RUNNING"),
            AttemptState::Finished => write!(f, "FINISHED"),
            AttemptState::Canceling => write!(f, "CANCELING"),
            AttemptState::Canceled => write!(f, "CANCELED"),
            AttemptState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Attempt record (owned by whoever created the attempt, shared with the registry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt_id: AttemptId,
    pub vertex_ref: VertexRef,
    /// 0 for the first attempt of a vertex, incremented on every retry
    pub attempt_number: u32,
    pub state: AttemptState,
}

impl AttemptRecord {
    /// Create a first attempt in `CREATED` state
    pub fn new(attempt_id: AttemptId, vertex_ref: VertexRef) -> Self {
        Self {
            attempt_id,
            vertex_ref,
            attempt_number: 0,
            state: AttemptState::Created,
        }
    }

    pub fn with_attempt_number(mut self, attempt_number: u32) -> Self {
        self.attempt_number = attempt_number;
        self
    }

    pub fn with_state(mut self, state: AttemptState) -> Self {
        self.state = state;
        self
    }
}
