//! Worker lifecycle state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Unique identifier for a worker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(u64);

impl WorkerId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Initial state, not yet installing.
    Parsed,
    /// Installing (precache population in flight).
    Installing,
    /// Installed, eligible for immediate activation (skip-waiting).
    Installed,
    /// Activating (orphan sweep and client claim in flight).
    Activating,
    /// Active and controlling pages.
    Activated,
    /// Redundant (install failed or replaced).
    Redundant,
}

impl Default for WorkerState {
    fn default() -> Self {
        Self::Parsed
    }
}

/// A worker instance.
#[derive(Debug, Clone)]
pub struct ServiceWorker {
    /// Unique ID.
    pub id: WorkerId,

    /// Current state.
    pub state: WorkerState,

    /// Error message if install failed.
    pub error: Option<String>,

    /// Time of last state change.
    pub state_changed_at: Instant,
}

impl ServiceWorker {
    /// Create a new worker in the initial state.
    pub fn new() -> Self {
        Self {
            id: WorkerId::new(),
            state: WorkerState::Parsed,
            error: None,
            state_changed_at: Instant::now(),
        }
    }

    /// Set state.
    pub fn set_state(&mut self, state: WorkerState) {
        self.state = state;
        self.state_changed_at = Instant::now();
    }

    /// Mark the worker redundant with an error message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.set_state(WorkerState::Redundant);
    }

    /// Check if active.
    pub fn is_active(&self) -> bool {
        self.state == WorkerState::Activated
    }

    /// Check if redundant.
    pub fn is_redundant(&self) -> bool {
        self.state == WorkerState::Redundant
    }
}

impl Default for ServiceWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_initial_state() {
        let worker = ServiceWorker::new();
        assert_eq!(worker.state, WorkerState::Parsed);
        assert!(!worker.is_active());
        assert!(worker.error.is_none());
    }

    #[test]
    fn test_worker_state_transitions() {
        let mut worker = ServiceWorker::new();

        worker.set_state(WorkerState::Installing);
        assert_eq!(worker.state, WorkerState::Installing);

        worker.set_state(WorkerState::Installed);
        worker.set_state(WorkerState::Activating);
        worker.set_state(WorkerState::Activated);
        assert!(worker.is_active());
    }

    #[test]
    fn test_worker_fail() {
        let mut worker = ServiceWorker::new();
        worker.set_state(WorkerState::Installing);
        worker.fail("precache fetch failed");

        assert!(worker.is_redundant());
        assert_eq!(worker.error.as_deref(), Some("precache fetch failed"));
    }

    #[test]
    fn test_worker_ids_are_unique() {
        assert_ne!(WorkerId::new(), WorkerId::new());
    }
}
