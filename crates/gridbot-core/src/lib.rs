//! Gridbot Core - Checkerboard Placement Workflow
//!
//! A small orchestrator that, for a rectangular region of integer
//! coordinates, computes a deterministic two-color parity pattern and
//! drives an externally controlled actor to realize it:
//! - Pattern resolver: pure coordinate-to-color parity function
//! - Navigation adapter: movement request + completion/timeout guard
//! - Selection adapter: slot selection with verify-and-retry
//! - Placement adapter: reference-surface scan with a below-target fallback
//! - Region orchestrator: sequencing, rate limiting, progress, summary
//!
//! The external actor is consumed only through the [`world::ActorWorld`]
//! capability trait; the crate never depends on a concrete automation
//! client.
//!
//! # Example
//!
//! ```rust,ignore
//! use gridbot_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(world: Arc<dyn gridbot_core::world::ActorWorld>) {
//! let orchestrator = RegionOrchestrator::new(world, OrchestratorConfig::default());
//! let handle = orchestrator.handle();
//!
//! let region = Region::from_corners(Cell::new(0, 0), Cell::new(15, 15), 64);
//! let report = orchestrator.run(region).await.unwrap();
//!
//! println!("{}", report.summary);
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod error;
pub mod handle;
pub mod navigate;
pub mod orchestrator;
pub mod pattern;
pub mod placement;
pub mod retry;
pub mod selection;
pub mod types;
pub mod world;

// Re-exports for convenience
pub use error::{CellError, RunError, SelectionVerificationFailed};
pub use handle::{RunHandle, RunStatus};
pub use navigate::{NavConfig, NavOutcome, Navigator};
pub use orchestrator::{OrchestratorConfig, RegionOrchestrator, RunReport};
pub use pattern::{color_at, color_of};
pub use placement::{PlaceOutcome, Placer};
pub use retry::RetryPolicy;
pub use selection::{SelectionConfig, Selector};
pub use types::{
    BlockPos, Cell, CellOutcome, Color, Face, Palette, PlacementResult, Position, Region,
    ResourceId, RunState, RunSummary,
};
pub use world::{ActorWorld, Pitch};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the placement workflow
    pub use crate::{
        ActorWorld, Cell, CellOutcome, Color, OrchestratorConfig, Region, RegionOrchestrator,
        RunHandle, RunState, RunSummary,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
