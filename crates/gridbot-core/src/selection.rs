//! Resource-selection adapter
//!
//! Ensures the actor's active slot holds the resource for a requested
//! color. Selection itself is fire-and-forget; when the collaborator
//! exposes the held resource, the adapter verifies after a settle delay
//! and retries a bounded number of times. Verification failure degrades
//! to a warning: the external resource state may simply be unobservable
//! in some configurations, and the workflow proceeds anyway.

use crate::error::SelectionVerificationFailed;
use crate::retry::RetryPolicy;
use crate::types::{Color, Palette};
use crate::world::ActorWorld;
use std::sync::Arc;
use std::time::Duration;

/// Selection tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Pause between issuing a selection and reading back the held resource
    pub settle_delay: Duration,
    /// Bounded verify-and-retry policy
    pub retry: RetryPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            retry: RetryPolicy::default(),
        }
    }
}

/// Keeps the correct color's resource in the actor's hand.
#[derive(Clone)]
pub struct Selector {
    world: Arc<dyn ActorWorld>,
    config: SelectionConfig,
    palette: Palette,
}

impl Selector {
    /// Create a selector over a collaborator
    #[must_use]
    pub fn new(world: Arc<dyn ActorWorld>, config: SelectionConfig, palette: Palette) -> Self {
        Self {
            world,
            config,
            palette,
        }
    }

    /// Select the slot for `color` and best-effort verify the held
    /// resource. Always succeeds from the caller's perspective; the
    /// verification result is returned for logging and tests.
    pub async fn ensure_holding(&self, color: Color) -> Result<(), SelectionVerificationFailed> {
        let slot = color.slot();
        let expected = self.palette.resource(color).clone();

        for attempt in 1..=self.config.retry.max_attempts {
            let delay = self.config.retry.delay_before(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            self.world.select_slot(slot).await;
            tokio::time::sleep(self.config.settle_delay).await;

            match self.world.held_resource().await {
                // Unobservable inventory: trust the selection request.
                None => return Ok(()),
                Some(held) if held == expected => return Ok(()),
                Some(held) => {
                    tracing::debug!(
                        attempt,
                        slot,
                        %expected,
                        %held,
                        "held resource mismatch after selection"
                    );
                }
            }
        }

        let held = match self.world.held_resource().await {
            Some(r) => r.to_string(),
            None => "nothing".to_string(),
        };
        let failure = SelectionVerificationFailed {
            expected: expected.to_string(),
            held,
            attempts: self.config.retry.max_attempts,
        };
        tracing::warn!(%failure, "proceeding despite selection verification failure");
        Err(failure)
    }
}
