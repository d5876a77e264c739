//! Capability interface to the external actor and world
//!
//! The workflow never names a concrete automation client. Everything it
//! needs from the outside is expressed here and injected into the adapters,
//! so the orchestrator can be driven against a real client or the
//! simulated world in `gridbot-sim` interchangeably.

use crate::types::{BlockPos, Face, Position, ResourceId};
use async_trait::async_trait;

/// Vertical orientation requests the workflow issues before placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// Look straight down
    Down,
    /// Look at the horizon
    Level,
}

/// Everything the placement workflow needs from the external actor,
/// world, and inventory.
///
/// One shared mutable external system with exactly one writer (the
/// orchestrator) during a run. Requests are best-effort: a `move_to`
/// issues an intended trajectory, it does not guarantee arrival, and a
/// new target implicitly supersedes the previous one.
#[async_trait]
pub trait ActorWorld: Send + Sync {
    /// Current actor position.
    async fn position(&self) -> Position;

    /// Request movement to within `radius` of a target. Fire-and-forget;
    /// arrival is observed by polling [`ActorWorld::position`].
    async fn move_to(&self, target: Position, radius: f64);

    /// Select a hotbar slot. Fire-and-forget.
    async fn select_slot(&self, slot: u8);

    /// Resource currently held, if observable in this configuration.
    async fn held_resource(&self) -> Option<ResourceId>;

    /// Stock a hotbar slot with a resource (requires elevated rights).
    ///
    /// # Errors
    /// Returns a collaborator-reported message when staging fails.
    async fn stock_slot(&self, slot: u8, resource: &ResourceId) -> Result<(), String>;

    /// Resource occupying a world position, if observable.
    async fn resource_at(&self, pos: BlockPos) -> Option<ResourceId>;

    /// Whether a position holds a solid, non-replaceable block.
    async fn solid_at(&self, pos: BlockPos) -> bool;

    /// Orient the actor vertically.
    async fn look(&self, pitch: Pitch);

    /// Place the held resource against a face of a reference block.
    ///
    /// # Errors
    /// Returns the collaborator-reported rejection message.
    async fn place_against(&self, reference: BlockPos, face: Face) -> Result<(), String>;

    /// Whether the actor holds elevated placement rights (creative-style
    /// inventory staging and unrestricted placement).
    async fn has_placement_rights(&self) -> bool;
}
