// Execution attempt registry
use crate::domain::{AttemptId, AttemptRecord, VertexRef};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Index of execution attempts by attempt ID.
///
/// Records are shared with their creator through `Arc`. Registering an ID
/// twice replaces the earlier record. Entries are never evicted; they live
/// as long as the registry.
#[derive(Debug, Default)]
pub struct AttemptRegistry {
    attempts: RwLock<HashMap<AttemptId, Arc<AttemptRecord>>>,
}

impl AttemptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `record.attempt_id`
    pub fn register(&self, record: impl Into<Arc<AttemptRecord>>) {
        let record = record.into();
        let attempt_id = record.attempt_id.clone();
        let vertex = record.vertex_ref.clone();

        let previous = self
            .attempts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(attempt_id.clone(), record);

        if previous.is_some() {
            debug!(attempt_id = %attempt_id, vertex = %vertex, "Replaced registered attempt");
        } else {
            debug!(attempt_id = %attempt_id, vertex = %vertex, "Registered attempt");
        }
    }

    /// Look up an attempt; `None` if it was never registered
    pub fn find(&self, attempt_id: &AttemptId) -> Option<Arc<AttemptRecord>> {
        self.attempts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(attempt_id)
            .cloned()
    }

    /// Vertex the attempt belongs to; `None` if the attempt is unknown
    pub fn find_vertex_for_attempt(&self, attempt_id: &AttemptId) -> Option<VertexRef> {
        self.find(attempt_id)
            .map(|record| record.vertex_ref.clone())
    }

    /// All attempts of one vertex, oldest attempt first
    pub fn attempts_for_vertex(&self, vertex: &VertexRef) -> Vec<Arc<AttemptRecord>> {
        let mut attempts: Vec<_> = self
            .attempts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|record| &record.vertex_ref == vertex)
            .cloned()
            .collect();
        attempts.sort_by_key(|record| record.attempt_number);
        attempts
    }

    /// Point-in-time copy of every registered attempt (unordered)
    pub fn snapshot(&self) -> Vec<Arc<AttemptRecord>> {
        self.attempts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.attempts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
