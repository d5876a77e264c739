//! Gridbot Sim - deterministic simulated collaborator
//!
//! Implements the [`ActorWorld`] capability trait over an in-memory
//! world so the workflow can run headless:
//! - seeded RNG for reproducible actor movement
//! - block map keyed by integer position, with an optional flat ground
//! - configurable failure modes (frozen actor, denied placement,
//!   revoked rights, unobservable inventory or world)
//!
//! Used by the test suites and by the CLI `simulate` command.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use async_trait::async_trait;
use gridbot_core::types::{BlockPos, Face, Position, ResourceId};
use gridbot_core::world::{ActorWorld, Pitch};
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;

/// Simulated world configuration.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Actor spawn position
    pub start: Position,
    /// Everything at or below this level is solid ground; `None` for a
    /// bottomless world
    pub ground_level: Option<i32>,
    /// Maximum distance the actor covers between two position polls
    pub step_per_poll: f64,
    /// Navigation never makes progress
    pub freeze_actor: bool,
    /// Every placement request is rejected
    pub deny_placement: bool,
    /// The actor has no elevated placement rights
    pub revoke_rights: bool,
    /// Inventory staging requests fail (rights otherwise intact)
    pub deny_staging: bool,
    /// The held resource is unobservable
    pub hide_inventory: bool,
    /// World resources are unobservable
    pub hide_world: bool,
    /// Resources that exist in the world but do not count as solid
    /// (vegetation-style surfaces a placement can still land against)
    pub replaceable: Vec<ResourceId>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start: Position::new(0.5, 65.0, 0.5),
            ground_level: Some(63),
            step_per_poll: 1.0,
            freeze_actor: false,
            deny_placement: false,
            revoke_rights: false,
            deny_staging: false,
            hide_inventory: false,
            hide_world: false,
            replaceable: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct SimState {
    position: Position,
    goal: Option<Position>,
    slots: HashMap<u8, ResourceId>,
    active_slot: u8,
    blocks: HashMap<BlockPos, ResourceId>,
    pitch: Pitch,
    placements_issued: u64,
    moves_issued: u64,
}

/// In-memory world implementing every workflow capability.
pub struct SimWorld {
    config: SimConfig,
    state: Mutex<SimState>,
    rng: Mutex<StdRng>,
}

impl SimWorld {
    /// Create a simulated world
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        let state = SimState {
            position: config.start,
            goal: None,
            slots: HashMap::new(),
            active_slot: 0,
            blocks: HashMap::new(),
            pitch: Pitch::Level,
            placements_issued: 0,
            moves_issued: 0,
        };
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            state: Mutex::new(state),
            rng: Mutex::new(rng),
        }
    }

    /// Put a resource into a hotbar slot directly (test fixture)
    pub fn preload_slot(&self, slot: u8, resource: ResourceId) {
        self.state.lock().slots.insert(slot, resource);
    }

    /// Pre-place a block (test fixture)
    pub fn set_block(&self, pos: BlockPos, resource: ResourceId) {
        self.state.lock().blocks.insert(pos, resource);
    }

    /// Block at a position, if any
    #[must_use]
    pub fn block_at(&self, pos: BlockPos) -> Option<ResourceId> {
        self.state.lock().blocks.get(&pos).cloned()
    }

    /// Number of blocks placed into the map
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.state.lock().blocks.len()
    }

    /// Placement requests issued so far
    #[must_use]
    pub fn placements_issued(&self) -> u64 {
        self.state.lock().placements_issued
    }

    /// Movement goals issued so far
    #[must_use]
    pub fn moves_issued(&self) -> u64 {
        self.state.lock().moves_issued
    }

    /// Resource currently staged in a slot
    #[must_use]
    pub fn slot_contents(&self, slot: u8) -> Option<ResourceId> {
        self.state.lock().slots.get(&slot).cloned()
    }

    /// Advance the actor one bounded random step toward its goal.
    fn step_actor(&self, state: &mut SimState) {
        if self.config.freeze_actor {
            return;
        }
        let Some(goal) = state.goal else { return };

        let pos = state.position;
        let (dx, dy, dz) = (goal.x - pos.x, goal.y - pos.y, goal.z - pos.z);
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();
        if distance < f64::EPSILON {
            return;
        }

        let step = {
            let mut rng = self.rng.lock();
            self.config.step_per_poll * rng.random_range(0.75..=1.0)
        };
        let step = step.min(distance);
        state.position = Position::new(
            pos.x + dx / distance * step,
            pos.y + dy / distance * step,
            pos.z + dz / distance * step,
        );
    }
}

#[async_trait]
impl ActorWorld for SimWorld {
    async fn position(&self) -> Position {
        let mut state = self.state.lock();
        self.step_actor(&mut state);
        state.position
    }

    async fn move_to(&self, target: Position, _radius: f64) {
        let mut state = self.state.lock();
        // A new goal supersedes the previous one.
        state.goal = Some(target);
        state.moves_issued += 1;
        tracing::trace!(x = target.x, y = target.y, z = target.z, "sim: move goal set");
    }

    async fn select_slot(&self, slot: u8) {
        self.state.lock().active_slot = slot;
    }

    async fn held_resource(&self) -> Option<ResourceId> {
        if self.config.hide_inventory {
            return None;
        }
        let state = self.state.lock();
        state.slots.get(&state.active_slot).cloned()
    }

    async fn stock_slot(&self, slot: u8, resource: &ResourceId) -> Result<(), String> {
        if self.config.revoke_rights || self.config.deny_staging {
            return Err("creative interface unavailable".into());
        }
        self.state.lock().slots.insert(slot, resource.clone());
        Ok(())
    }

    async fn resource_at(&self, pos: BlockPos) -> Option<ResourceId> {
        if self.config.hide_world {
            return None;
        }
        self.state.lock().blocks.get(&pos).cloned()
    }

    async fn solid_at(&self, pos: BlockPos) -> bool {
        let state = self.state.lock();
        if let Some(resource) = state.blocks.get(&pos) {
            return !self.config.replaceable.contains(resource);
        }
        self.config.ground_level.is_some_and(|g| pos.y <= g)
    }

    async fn look(&self, pitch: Pitch) {
        self.state.lock().pitch = pitch;
    }

    async fn place_against(&self, reference: BlockPos, face: Face) -> Result<(), String> {
        let mut state = self.state.lock();
        state.placements_issued += 1;

        if self.config.deny_placement {
            return Err("placement denied by server".into());
        }

        let target = reference.offset(face);
        if state.blocks.contains_key(&target) {
            return Err(format!("space at {target} is occupied"));
        }
        let held = state
            .slots
            .get(&state.active_slot)
            .cloned()
            .ok_or_else(|| "nothing held to place".to_string())?;
        state.blocks.insert(target, held);
        Ok(())
    }

    async fn has_placement_rights(&self) -> bool {
        !self.config.revoke_rights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn actor_walks_toward_goal() {
        let world = SimWorld::new(SimConfig::default());
        world.move_to(Position::new(10.5, 65.0, 0.5), 1.0).await;

        let start = world.position().await;
        for _ in 0..20 {
            let _ = world.position().await;
        }
        let end = world.position().await;

        assert!(end.x > start.x);
        assert!(end.distance_to(&Position::new(10.5, 65.0, 0.5)) < 0.5);
    }

    #[tokio::test]
    async fn frozen_actor_never_moves() {
        let world = SimWorld::new(SimConfig {
            freeze_actor: true,
            ..SimConfig::default()
        });
        world.move_to(Position::new(10.5, 65.0, 0.5), 1.0).await;

        let start = world.position().await;
        for _ in 0..20 {
            let _ = world.position().await;
        }
        assert_eq!(world.position().await, start);
    }

    #[tokio::test]
    async fn placement_lands_held_resource() {
        let world = SimWorld::new(SimConfig::default());
        let concrete = ResourceId::new("black_concrete");
        world.stock_slot(0, &concrete).await.unwrap();
        world.select_slot(0).await;

        let reference = BlockPos::new(0, 63, 0);
        world.place_against(reference, Face::PosY).await.unwrap();

        assert_eq!(world.block_at(BlockPos::new(0, 64, 0)), Some(concrete));
    }

    #[tokio::test]
    async fn placement_into_occupied_space_is_rejected() {
        let world = SimWorld::new(SimConfig::default());
        world
            .stock_slot(0, &ResourceId::new("black_concrete"))
            .await
            .unwrap();
        world.set_block(BlockPos::new(0, 64, 0), ResourceId::new("stone"));

        let result = world
            .place_against(BlockPos::new(0, 63, 0), Face::PosY)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn ground_is_solid_below_level() {
        let world = SimWorld::new(SimConfig::default());
        assert!(world.solid_at(BlockPos::new(7, 63, -3)).await);
        assert!(!world.solid_at(BlockPos::new(7, 64, -3)).await);
    }

    #[tokio::test]
    async fn replaceable_blocks_are_present_but_not_solid() {
        let world = SimWorld::new(SimConfig {
            ground_level: None,
            replaceable: vec![ResourceId::new("short_grass")],
            ..SimConfig::default()
        });
        let pos = BlockPos::new(0, 63, 0);
        world.set_block(pos, ResourceId::new("short_grass"));

        assert!(!world.solid_at(pos).await);
        assert_eq!(world.resource_at(pos).await, Some(ResourceId::new("short_grass")));
    }

    #[tokio::test]
    async fn bottomless_world_has_no_ground() {
        let world = SimWorld::new(SimConfig {
            ground_level: None,
            ..SimConfig::default()
        });
        assert!(!world.solid_at(BlockPos::new(0, 0, 0)).await);
    }

    #[tokio::test]
    async fn hidden_inventory_is_unobservable() {
        let world = SimWorld::new(SimConfig {
            hide_inventory: true,
            ..SimConfig::default()
        });
        world
            .stock_slot(0, &ResourceId::new("black_concrete"))
            .await
            .unwrap();
        world.select_slot(0).await;
        assert_eq!(world.held_resource().await, None);
    }

    #[tokio::test]
    async fn revoked_rights_deny_staging() {
        let world = SimWorld::new(SimConfig {
            revoke_rights: true,
            ..SimConfig::default()
        });
        assert!(!world.has_placement_rights().await);
        assert!(world
            .stock_slot(0, &ResourceId::new("black_concrete"))
            .await
            .is_err());
    }
}
