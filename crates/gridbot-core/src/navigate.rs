//! Navigation adapter
//!
//! Wraps the collaborator's fire-and-forget movement request with a
//! completion guard: issue the goal, then poll the actor position until
//! it is within the proximity radius or the timeout elapses. On timeout
//! the adapter still soft-succeeds when the actor ended up within a
//! looser fallback radius; placement reach is forgiving enough for that.

use crate::error::CellError;
use crate::handle::RunHandle;
use crate::types::{BlockPos, Position};
use crate::world::ActorWorld;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Navigation tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavConfig {
    /// Arrival radius for a hard success
    pub radius: f64,
    /// Looser radius accepted as a soft success on timeout
    pub fallback_radius: f64,
    /// Position poll interval
    pub poll_interval: Duration,
    /// Overall per-target timeout
    pub timeout: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            fallback_radius: 3.0,
            poll_interval: Duration::from_millis(250),
            timeout: Duration::from_secs(20),
        }
    }
}

/// How a navigation request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Within the arrival radius
    Arrived,
    /// Timed out, but within the fallback radius; the actor may still be
    /// moving when this is returned
    CloseEnough,
}

/// Moves the actor near target cells.
#[derive(Clone)]
pub struct Navigator {
    world: Arc<dyn ActorWorld>,
    config: NavConfig,
}

impl Navigator {
    /// Create a navigator over a collaborator
    #[must_use]
    pub fn new(world: Arc<dyn ActorWorld>, config: NavConfig) -> Self {
        Self { world, config }
    }

    /// Navigate to a standing position near `target`.
    ///
    /// Issues one movement request, then polls. Issuing a new goal later
    /// supersedes this one on the collaborator side; this call stops
    /// polling as soon as it returns.
    ///
    /// # Errors
    /// - [`CellError::NavigationTimeout`] when the timeout elapses beyond
    ///   the fallback radius
    /// - [`CellError::Cancelled`] when a stop was requested mid-poll
    pub async fn goto(&self, target: BlockPos, handle: &RunHandle) -> Result<NavOutcome, CellError> {
        let goal = target.center();
        self.world.move_to(goal, self.config.radius).await;

        let deadline = Instant::now() + self.config.timeout;
        loop {
            if handle.stop_requested() {
                return Err(CellError::Cancelled);
            }

            let distance = self.distance_to(goal).await;
            if distance <= self.config.radius {
                tracing::debug!(%target, distance, "navigation arrived");
                return Ok(NavOutcome::Arrived);
            }

            if Instant::now() >= deadline {
                if distance <= self.config.fallback_radius {
                    tracing::debug!(
                        %target,
                        distance,
                        "navigation timed out within fallback radius, proceeding"
                    );
                    return Ok(NavOutcome::CloseEnough);
                }
                return Err(CellError::NavigationTimeout { target, distance });
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn distance_to(&self, goal: Position) -> f64 {
        self.world.position().await.distance_to(&goal)
    }
}
