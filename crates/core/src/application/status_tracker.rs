// Job status tracking with a one-shot completion signal
use crate::application::cancel::CancelToken;
use crate::application::constants::{INITIAL_STATUS, UNSET_STATUS_TIMESTAMP};
use crate::domain::error::{DomainError, Result};
use crate::domain::JobStatus;
use crate::port::time_provider::SystemTimeProvider;
use crate::port::TimeProvider;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Tracks the lifecycle status of one job.
///
/// All status changes go through a single mutex, so the terminality check and
/// the update happen atomically with respect to concurrent callers. Once the
/// status is terminal, further transition requests are absorbed and logged.
///
/// Completion is a separate one-shot signal: it is resolved exactly once by
/// [`StatusTracker::complete_with`] and can be awaited by any number of tasks,
/// including ones that subscribe after resolution.
pub struct StatusTracker {
    state: Mutex<TrackerState>,
    completion_tx: watch::Sender<Option<JobStatus>>,
    time_provider: Arc<dyn TimeProvider>,
}

struct TrackerState {
    current: JobStatus,
    completion: Option<JobStatus>,
    /// Most recent time each status was entered (epoch ms)
    entered_at: BTreeMap<JobStatus, i64>,
}

impl StatusTracker {
    /// Create a tracker in `INITIALIZING` using the system clock
    pub fn new() -> Self {
        Self::with_time_provider(Arc::new(SystemTimeProvider))
    }

    pub fn with_time_provider(time_provider: Arc<dyn TimeProvider>) -> Self {
        let (completion_tx, _) = watch::channel(None);
        let mut entered_at = BTreeMap::new();
        entered_at.insert(INITIAL_STATUS, time_provider.now_millis());

        Self {
            state: Mutex::new(TrackerState {
                current: INITIAL_STATUS,
                completion: None,
                entered_at,
            }),
            completion_tx,
            time_provider,
        }
    }

    /// Current status
    pub fn status(&self) -> JobStatus {
        self.lock().current
    }

    /// Final status if completion was already signalled
    pub fn completion(&self) -> Option<JobStatus> {
        self.lock().completion
    }

    /// Request a move to `target`.
    ///
    /// Any non-terminal status may move to any status; edges are not
    /// validated. Returns `false` if the tracker was already terminal, in
    /// which case the status is left unchanged.
    pub fn request_transition(&self, target: JobStatus) -> bool {
        let mut state = self.lock();
        self.apply_transition(&mut state, target)
    }

    /// Resolve the completion signal with `final_status`, then request the
    /// same transition as [`StatusTracker::request_transition`].
    ///
    /// # Errors
    /// `DomainError::CompletionAlreadyResolved` if completion was already
    /// signalled. Neither the signal nor the status change in that case.
    pub fn try_complete_with(&self, final_status: JobStatus) -> Result<bool> {
        let mut state = self.lock();

        if let Some(existing) = state.completion {
            return Err(DomainError::CompletionAlreadyResolved {
                existing,
                attempted: final_status,
            });
        }

        state.completion = Some(final_status);
        self.completion_tx.send_replace(Some(final_status));
        info!(final_status = %final_status, "Job completion signalled");

        Ok(self.apply_transition(&mut state, final_status))
    }

    /// Like [`StatusTracker::try_complete_with`], for callers that report
    /// completion exactly once.
    ///
    /// # Panics
    /// If completion was already signalled.
    pub fn complete_with(&self, final_status: JobStatus) -> bool {
        match self.try_complete_with(final_status) {
            Ok(applied) => applied,
            Err(e) => panic!("{e}"),
        }
    }

    /// Wait until completion is signalled and return the final status.
    ///
    /// Returns immediately if completion already happened. Holds no lock
    /// while waiting.
    pub async fn await_completion(&self) -> JobStatus {
        let mut rx = self.completion_tx.subscribe();
        let resolved = rx.wait_for(Option::is_some).await.map(|value| *value);

        match resolved {
            Ok(Some(status)) => status,
            // `completion_tx` lives as long as `self`
            _ => unreachable!("completion sender dropped while tracker is borrowed"),
        }
    }

    /// Wait for completion unless `cancel` fires first (`None`)
    pub async fn await_completion_or_cancel(&self, cancel: &mut CancelToken) -> Option<JobStatus> {
        tokio::select! {
            status = self.await_completion() => Some(status),
            _ = cancel.cancelled() => {
                debug!("Completion wait cancelled");
                None
            }
        }
    }

    /// Epoch ms at which `status` was last entered, 0 if never
    pub fn status_timestamp(&self, status: JobStatus) -> i64 {
        self.lock()
            .entered_at
            .get(&status)
            .copied()
            .unwrap_or(UNSET_STATUS_TIMESTAMP)
    }

    /// Every status entered so far with its last-entry timestamp
    pub fn status_timestamps(&self) -> BTreeMap<JobStatus, i64> {
        self.lock().entered_at.clone()
    }

    /// Current status together with the timestamps, read under one lock
    pub fn status_with_timestamps(&self) -> (JobStatus, BTreeMap<JobStatus, i64>) {
        let state = self.lock();
        (state.current, state.entered_at.clone())
    }

    fn apply_transition(&self, state: &mut TrackerState, target: JobStatus) -> bool {
        if state.current.is_terminal() {
            warn!(
                current = %state.current,
                target = %target,
                "Ignoring transition requested while in terminal state"
            );
            return false;
        }

        debug!(from = %state.current, to = %target, "Job status transition");
        state.current = target;
        let now = self.time_provider.now_millis();
        state.entered_at.insert(target, now);
        true
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // State is consistent after every statement, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("StatusTracker")
            .field("current", &state.current)
            .field("completion", &state.completion)
            .finish()
    }
}
