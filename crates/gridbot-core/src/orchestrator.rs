//! Region orchestrator
//!
//! Drives the full rectangular scan:
//! - precondition probe (elevated placement rights), then inventory
//!   staging (best effort)
//! - per cell, strictly sequential: resolve color -> navigate -> select
//!   resource -> settle -> orient downward -> place -> record
//! - fixed inter-cell delay to respect collaborator rate limits
//! - progress after each full row
//! - all per-cell errors become `Failed` outcomes; only precondition
//!   failures abort the run
//!
//! Cells share one external actor, so there is no parallelism: an actor
//! cannot navigate to two places or hold two resources at once.

use crate::error::{describe_cell_failure, CellError, RunError};
use crate::handle::RunHandle;
use crate::navigate::{NavConfig, Navigator};
use crate::pattern::color_of;
use crate::placement::{PlaceOutcome, Placer};
use crate::selection::{SelectionConfig, Selector};
use crate::types::{
    Cell, CellOutcome, Color, Palette, PlacementResult, Region, RunState, RunSummary,
};
use crate::world::{ActorWorld, Pitch};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrator tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Navigation adapter settings
    pub nav: NavConfig,
    /// Selection adapter settings
    pub selection: SelectionConfig,
    /// Color-to-resource mapping
    pub palette: Palette,
    /// Pause between resource selection and placement
    pub settle_delay: Duration,
    /// Pause after each placement attempt (collaborator rate limit)
    pub cell_delay: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            selection: SelectionConfig::default(),
            palette: Palette::default(),
            settle_delay: Duration::from_millis(250),
            cell_delay: Duration::from_millis(150),
        }
    }
}

/// Final report of one region run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal state (`Completed` or `Aborted`)
    pub state: RunState,
    /// Aggregate counts; partial when aborted
    pub summary: RunSummary,
    /// Per-cell results in processing order
    pub results: Vec<PlacementResult>,
}

/// Sequences the adapters over every cell of a region.
pub struct RegionOrchestrator {
    world: Arc<dyn ActorWorld>,
    config: OrchestratorConfig,
    navigator: Navigator,
    selector: Selector,
    placer: Placer,
    handle: RunHandle,
}

impl RegionOrchestrator {
    /// Create an orchestrator over a collaborator
    #[must_use]
    pub fn new(world: Arc<dyn ActorWorld>, config: OrchestratorConfig) -> Self {
        let navigator = Navigator::new(world.clone(), config.nav);
        let selector = Selector::new(
            world.clone(),
            config.selection.clone(),
            config.palette.clone(),
        );
        let placer = Placer::new(world.clone());
        Self {
            world,
            config,
            navigator,
            selector,
            placer,
            handle: RunHandle::new(),
        }
    }

    /// Handle for stopping the run and querying status
    #[inline]
    #[must_use]
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    /// Run the placement workflow over a region.
    ///
    /// Returns the report for both terminal states; the summary is
    /// partial when the run was stopped. Placements already made are
    /// never rolled back.
    ///
    /// # Errors
    /// - [`RunError::AlreadyRunning`] when a run is still in progress on
    ///   this orchestrator
    /// - [`RunError::PreconditionUnmet`] when the actor lacks elevated
    ///   placement rights; no cell is processed in that case
    pub async fn run(&self, region: Region) -> Result<RunReport, RunError> {
        let total = region.cell_count();
        if !self.handle.try_begin(total) {
            return Err(RunError::AlreadyRunning);
        }

        if !self.world.has_placement_rights().await {
            self.handle.finish(RunState::Aborted);
            return Err(RunError::PreconditionUnmet(
                "actor has no elevated placement rights".into(),
            ));
        }
        tracing::info!(
            min_x = region.min_x(),
            min_z = region.min_z(),
            max_x = region.max_x(),
            max_z = region.max_z(),
            level = region.level(),
            cells = total,
            "starting region run"
        );

        self.stage_inventory().await;

        let mut summary = RunSummary::default();
        let mut results = Vec::new();
        let mut stopped = false;

        'rows: for x in region.min_x()..=region.max_x() {
            for z in region.min_z()..=region.max_z() {
                if self.handle.stop_requested() {
                    stopped = true;
                    break 'rows;
                }

                let cell = Cell::new(x, z);
                let color = color_of(cell);
                match self.process_cell(cell, color, &region).await {
                    Ok(outcome) => {
                        summary.record(&outcome);
                        results.push(PlacementResult {
                            cell,
                            color,
                            outcome,
                        });
                    }
                    Err(CellError::Cancelled) => {
                        stopped = true;
                        break 'rows;
                    }
                    Err(err) => {
                        tracing::warn!("{}", describe_cell_failure(cell, &err));
                        let outcome = CellOutcome::Failed(err.reason().to_string());
                        summary.record(&outcome);
                        results.push(PlacementResult {
                            cell,
                            color,
                            outcome,
                        });
                    }
                }
                self.handle.record(summary);

                tokio::time::sleep(self.config.cell_delay).await;
            }

            let row = u64::from(x.abs_diff(region.min_x())) + 1;
            tracing::info!(
                row,
                rows = region.rows(),
                cells_done = summary.processed,
                cells_total = total,
                placed = summary.placed,
                "row completed"
            );
        }

        let state = if stopped {
            tracing::warn!(
                cells_done = summary.processed,
                cells_total = total,
                "run stopped by operator"
            );
            RunState::Aborted
        } else {
            RunState::Completed
        };
        self.handle.record(summary);
        self.handle.finish(state);
        tracing::info!(%summary, %state, "region run finished");

        Ok(RunReport {
            state,
            summary,
            results,
        })
    }

    /// Stock both pattern resources into their hotbar slots and pre-select
    /// the first. Best effort: staging failures are logged and the run
    /// continues with whatever the slots already hold.
    async fn stage_inventory(&self) {
        for color in [Color::A, Color::B] {
            let resource = self.config.palette.resource(color);
            if let Err(reason) = self.world.stock_slot(color.slot(), resource).await {
                tracing::warn!(
                    slot = color.slot(),
                    %resource,
                    reason,
                    "inventory staging failed, continuing with existing slots"
                );
            }
            tokio::time::sleep(self.config.settle_delay).await;
        }
        self.world.select_slot(Color::A.slot()).await;
    }

    async fn process_cell(
        &self,
        cell: Cell,
        color: Color,
        region: &Region,
    ) -> Result<CellOutcome, CellError> {
        let target = cell.at_level(region.level());
        // Stand on top of the cell being placed.
        let stand = cell.at_level(region.level() + 1);

        self.navigator.goto(stand, &self.handle).await?;

        // Verification failure is best-effort; already logged by the selector.
        let _ = self.selector.ensure_holding(color).await;

        tokio::time::sleep(self.config.settle_delay).await;
        self.world.look(Pitch::Down).await;

        match self.placer.place(target, self.config.palette.resource(color)).await? {
            PlaceOutcome::Placed => Ok(CellOutcome::Placed),
            PlaceOutcome::AlreadyCorrect => Ok(CellOutcome::SkippedAlreadyCorrect),
        }
    }
}
