//! Placement adapter
//!
//! Realizes a color's resource at a target position:
//! - idempotent no-op when the world already holds the correct resource
//! - otherwise scan a fixed ordered set of adjacent references (-x, +x,
//!   -z, +z, below) for a solid block and place against its facing side
//! - fallback: when no solid reference exists but the actor is close and
//!   something (even a replaceable surface) sits directly below the
//!   target, place against it
//!
//! No internal retries; retrying is the orchestrator's call.

use crate::error::CellError;
use crate::types::{BlockPos, Face, ResourceId};
use crate::world::{ActorWorld, Pitch};
use std::sync::Arc;

/// Horizontal distance within which the below-target fallback applies.
const FALLBACK_REACH: f64 = 3.0;

/// How a placement attempt resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// A placement request was issued and accepted
    Placed,
    /// The target already held the correct resource
    AlreadyCorrect,
}

/// Issues placement requests against reference surfaces.
#[derive(Clone)]
pub struct Placer {
    world: Arc<dyn ActorWorld>,
}

impl Placer {
    /// Create a placer over a collaborator
    #[must_use]
    pub fn new(world: Arc<dyn ActorWorld>) -> Self {
        Self { world }
    }

    /// Place `resource` at `target`.
    ///
    /// # Errors
    /// - [`CellError::NoReferenceSurface`] when neither the adjacent scan
    ///   nor the below-target fallback applies
    /// - [`CellError::PlacementRejected`] when the collaborator reports an
    ///   error for the request
    pub async fn place(
        &self,
        target: BlockPos,
        resource: &ResourceId,
    ) -> Result<PlaceOutcome, CellError> {
        if let Some(existing) = self.world.resource_at(target).await {
            if existing == *resource {
                tracing::debug!(%target, %resource, "already correct, skipping");
                return Ok(PlaceOutcome::AlreadyCorrect);
            }
        }

        // Fixed scan order; the first solid reference wins.
        let references = [
            BlockPos::new(target.x - 1, target.y, target.z),
            BlockPos::new(target.x + 1, target.y, target.z),
            BlockPos::new(target.x, target.y, target.z - 1),
            BlockPos::new(target.x, target.y, target.z + 1),
            BlockPos::new(target.x, target.y - 1, target.z),
        ];

        for reference in references {
            if !self.world.solid_at(reference).await {
                continue;
            }
            let face = Face::from_reference(reference, target);
            return self.request(target, reference, face).await;
        }

        // Fallback: the scan rejected the surface below (present but
        // replaceable, e.g. vegetation), yet a placement against it can
        // still land. Requires the actor to be close to the target.
        let below = BlockPos::new(target.x, target.y - 1, target.z);
        let position = self.world.position().await;
        if position.horizontal_distance_to(target) < FALLBACK_REACH
            && self.world.resource_at(below).await.is_some()
        {
            self.world.look(Pitch::Down).await;
            return self.request(target, below, Face::PosY).await;
        }

        Err(CellError::NoReferenceSurface { target })
    }

    async fn request(
        &self,
        target: BlockPos,
        reference: BlockPos,
        face: Face,
    ) -> Result<PlaceOutcome, CellError> {
        match self.world.place_against(reference, face).await {
            Ok(()) => {
                tracing::debug!(%target, %reference, ?face, "placed");
                Ok(PlaceOutcome::Placed)
            }
            Err(reason) => Err(CellError::PlacementRejected { target, reason }),
        }
    }
}
