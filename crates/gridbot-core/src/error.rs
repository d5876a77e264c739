//! Error types for the placement workflow
//!
//! The taxonomy mirrors the recovery policy:
//! - Per-cell errors ([`CellError`]) are caught at the orchestrator
//!   boundary and become `Failed` cell outcomes; the run continues.
//! - Selection verification failures are best-effort and logged only.
//! - Precondition failures ([`RunError`]) abort the entire run.

use crate::types::{BlockPos, Cell};

/// Errors that fail a single cell but never the run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CellError {
    /// The actor did not reach the target within the timeout, and was not
    /// even within the loose fallback radius
    #[error("navigation timed out {distance:.1} units from {target}")]
    NavigationTimeout {
        /// Navigation target
        target: BlockPos,
        /// Distance remaining when the timeout elapsed
        distance: f64,
    },

    /// No adjacent solid reference existed and the below-target fallback
    /// did not apply
    #[error("no reference surface to place against at {target}")]
    NoReferenceSurface {
        /// Intended placement position
        target: BlockPos,
    },

    /// The external system reported an error during the placement request
    #[error("placement rejected at {target}: {reason}")]
    PlacementRejected {
        /// Intended placement position
        target: BlockPos,
        /// Reason reported by the collaborator
        reason: String,
    },

    /// The run was stopped while this cell was in flight
    #[error("cancelled")]
    Cancelled,
}

impl CellError {
    /// Short reason string recorded in the cell outcome
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NavigationTimeout { .. } => "NavigationTimeout",
            Self::NoReferenceSurface { .. } => "NoReferenceSurface",
            Self::PlacementRejected { .. } => "PlacementRejected",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Best-effort selection verification failure. Logged, never fatal.
#[derive(Debug, Clone, thiserror::Error)]
#[error("held resource verification failed after {attempts} attempts (wanted {expected}, holding {held})")]
pub struct SelectionVerificationFailed {
    /// Resource the slot should have held
    pub expected: String,
    /// Resource actually held, or "nothing"
    pub held: String,
    /// Attempts made before giving up
    pub attempts: u32,
}

/// Errors that abort the entire run before or during cell processing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RunError {
    /// A required capability is missing; no cell can succeed
    #[error("precondition unmet: {0}")]
    PreconditionUnmet(String),

    /// A run is already in progress on this orchestrator
    #[error("a run is already in progress")]
    AlreadyRunning,
}

/// Helper: format a cell failure for the run log.
pub(crate) fn describe_cell_failure(cell: Cell, error: &CellError) -> String {
    format!("cell {cell}: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_error_reasons_are_stable() {
        let err = CellError::NavigationTimeout {
            target: BlockPos::new(1, 64, 2),
            distance: 7.3,
        };
        assert_eq!(err.reason(), "NavigationTimeout");

        let err = CellError::NoReferenceSurface {
            target: BlockPos::new(0, 64, 0),
        };
        assert_eq!(err.reason(), "NoReferenceSurface");

        let err = CellError::PlacementRejected {
            target: BlockPos::new(0, 64, 0),
            reason: "out of reach".into(),
        };
        assert_eq!(err.reason(), "PlacementRejected");
    }

    #[test]
    fn describe_failure_includes_coordinates() {
        let msg = describe_cell_failure(
            Cell::new(3, -4),
            &CellError::NoReferenceSurface {
                target: BlockPos::new(3, 64, -4),
            },
        );
        assert!(msg.contains("(3, -4)"));
        assert!(msg.contains("no reference surface"));
    }
}
