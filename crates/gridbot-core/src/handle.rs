//! Operator handle for an in-progress run
//!
//! Shared between the orchestrator and the operator surface:
//! - cooperative stop flag, checked at cell boundaries and inside
//!   navigation polls
//! - live status snapshot (state + running counts)

use crate::types::{RunState, RunSummary};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot of a run's progress at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RunStatus {
    /// Lifecycle state
    pub state: RunState,
    /// Counts so far
    pub summary: RunSummary,
    /// Total cells in the region, once known
    pub total_cells: u64,
}

#[derive(Debug)]
struct Shared {
    stop: AtomicBool,
    state: Mutex<RunState>,
    summary: Mutex<RunSummary>,
    total_cells: Mutex<u64>,
}

/// Handle for observing and stopping a run.
///
/// Cheap to clone; all clones share the same run.
#[derive(Debug, Clone)]
pub struct RunHandle {
    shared: Arc<Shared>,
}

impl RunHandle {
    /// Create a fresh handle in the idle state
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                stop: AtomicBool::new(false),
                state: Mutex::new(RunState::Idle),
                summary: Mutex::new(RunSummary::default()),
                total_cells: Mutex::new(0),
            }),
        }
    }

    /// Request a cooperative stop. The orchestrator abandons the current
    /// cell's pending navigation, skips remaining cells, and finishes as
    /// `Aborted` with the partial summary.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested
    #[inline]
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.shared.stop.load(Ordering::SeqCst)
    }

    /// Current status snapshot
    #[must_use]
    pub fn status(&self) -> RunStatus {
        RunStatus {
            state: *self.shared.state.lock(),
            summary: *self.shared.summary.lock(),
            total_cells: *self.shared.total_cells.lock(),
        }
    }

    /// Transition to `Running` unless a run is already in progress.
    /// Returns false without touching any state when one is.
    pub(crate) fn try_begin(&self, total_cells: u64) -> bool {
        let mut state = self.shared.state.lock();
        if *state == RunState::Running {
            return false;
        }
        *state = RunState::Running;
        *self.shared.summary.lock() = RunSummary::default();
        *self.shared.total_cells.lock() = total_cells;
        true
    }

    pub(crate) fn record(&self, summary: RunSummary) {
        *self.shared.summary.lock() = summary;
    }

    pub(crate) fn finish(&self, state: RunState) {
        *self.shared.state.lock() = state;
    }
}

impl Default for RunHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_starts_idle() {
        let handle = RunHandle::new();
        let status = handle.status();
        assert_eq!(status.state, RunState::Idle);
        assert_eq!(status.summary.processed, 0);
        assert!(!handle.stop_requested());
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let handle = RunHandle::new();
        let other = handle.clone();
        other.stop();
        assert!(handle.stop_requested());
    }

    #[test]
    fn status_reflects_lifecycle() {
        let handle = RunHandle::new();
        assert!(handle.try_begin(9));
        assert_eq!(handle.status().state, RunState::Running);
        assert_eq!(handle.status().total_cells, 9);

        let mut summary = RunSummary::default();
        summary.record(&crate::types::CellOutcome::Placed);
        handle.record(summary);
        assert_eq!(handle.status().summary.placed, 1);

        handle.finish(RunState::Completed);
        assert_eq!(handle.status().state, RunState::Completed);
    }

    #[test]
    fn begin_is_rejected_while_running() {
        let handle = RunHandle::new();
        assert!(handle.try_begin(4));
        assert!(!handle.try_begin(4));

        handle.finish(RunState::Completed);
        assert!(handle.try_begin(4));
    }
}
