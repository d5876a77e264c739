//! Core types for the placement workflow
//!
//! Defines the fundamental types shared by the adapters and the
//! orchestrator:
//! - Coordinates (block positions, actor positions, faces)
//! - Regions and cells
//! - Pattern colors and the resource palette
//! - Per-cell outcomes and the run summary

use serde::{Deserialize, Serialize};

/// An integer block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a block position
    #[inline]
    #[must_use]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position offset by a face direction
    #[inline]
    #[must_use]
    pub fn offset(self, face: Face) -> Self {
        let (dx, dy, dz) = face.delta();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Center of this block as a continuous position
    #[inline]
    #[must_use]
    pub fn center(self) -> Position {
        Position::new(
            f64::from(self.x) + 0.5,
            f64::from(self.y),
            f64::from(self.z) + 0.5,
        )
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A continuous actor position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Create a position
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position
    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal (xz-plane) distance to a block position
    #[must_use]
    pub fn horizontal_distance_to(&self, block: BlockPos) -> f64 {
        let dx = self.x - (f64::from(block.x) + 0.5);
        let dz = self.z - (f64::from(block.z) + 0.5);
        (dx * dx + dz * dz).sqrt()
    }
}

/// The face of a reference block a placement is issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Face {
    /// Unit offset of this face
    #[inline]
    #[must_use]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Self::NegX => (-1, 0, 0),
            Self::PosX => (1, 0, 0),
            Self::NegY => (0, -1, 0),
            Self::PosY => (0, 1, 0),
            Self::NegZ => (0, 0, -1),
            Self::PosZ => (0, 0, 1),
        }
    }

    /// Face pointing from a reference block toward a target block.
    ///
    /// The axis with the greatest coordinate delta wins; ties are broken
    /// with a fixed x > y > z priority so the result is deterministic.
    #[must_use]
    pub fn from_reference(reference: BlockPos, target: BlockPos) -> Self {
        let dx = target.x - reference.x;
        let dy = target.y - reference.y;
        let dz = target.z - reference.z;

        if dx.abs() >= dy.abs() && dx.abs() >= dz.abs() {
            if dx >= 0 { Self::PosX } else { Self::NegX }
        } else if dy.abs() >= dz.abs() {
            if dy >= 0 { Self::PosY } else { Self::NegY }
        } else if dz >= 0 {
            Self::PosZ
        } else {
            Self::NegZ
        }
    }
}

/// Identifier of a placeable resource, as reported by the external world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    /// Create a resource identifier
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One of the two parity classes a cell can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Assigned when `x + z` is even
    A,
    /// Assigned when `x + z` is odd
    B,
}

impl Color {
    /// Hotbar slot this color's resource is staged in (A -> 0, B -> 1)
    #[inline]
    #[must_use]
    pub fn slot(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Maps each color to the resource that should occupy its cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Resource for [`Color::A`] cells
    pub color_a: ResourceId,
    /// Resource for [`Color::B`] cells
    pub color_b: ResourceId,
}

impl Palette {
    /// Resource for a color
    #[inline]
    #[must_use]
    pub fn resource(&self, color: Color) -> &ResourceId {
        match color {
            Color::A => &self.color_a,
            Color::B => &self.color_b,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            color_a: ResourceId::new("black_concrete"),
            color_b: ResourceId::new("purple_concrete"),
        }
    }
}

/// One (x, z) coordinate inside a scanned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    /// Create a cell
    #[inline]
    #[must_use]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Block position of this cell at a vertical level
    #[inline]
    #[must_use]
    pub fn at_level(self, y: i32) -> BlockPos {
        BlockPos::new(self.x, y, self.z)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Inclusive rectangular scan area at a fixed vertical level.
///
/// Corners are normalized at construction, so `min <= max` holds on both
/// axes regardless of the order the two corners were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
    /// Vertical level placements happen at
    level: i32,
}

impl Region {
    /// Create a region from two corner coordinates at a vertical level.
    ///
    /// The corners may be given in any order.
    #[must_use]
    pub fn from_corners(corner_a: Cell, corner_b: Cell, level: i32) -> Self {
        Self {
            min_x: corner_a.x.min(corner_b.x),
            max_x: corner_a.x.max(corner_b.x),
            min_z: corner_a.z.min(corner_b.z),
            max_z: corner_a.z.max(corner_b.z),
            level,
        }
    }

    /// Minimum x coordinate
    #[inline]
    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Maximum x coordinate
    #[inline]
    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Minimum z coordinate
    #[inline]
    #[must_use]
    pub fn min_z(&self) -> i32 {
        self.min_z
    }

    /// Maximum z coordinate
    #[inline]
    #[must_use]
    pub fn max_z(&self) -> i32 {
        self.max_z
    }

    /// Vertical placement level
    #[inline]
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Number of rows (distinct x values)
    #[inline]
    #[must_use]
    pub fn rows(&self) -> u64 {
        u64::from(self.max_x.abs_diff(self.min_x)) + 1
    }

    /// Total cell count
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        let width = u64::from(self.max_x.abs_diff(self.min_x)) + 1;
        let depth = u64::from(self.max_z.abs_diff(self.min_z)) + 1;
        width * depth
    }

    /// Cells in ascending row-major order (outer x, inner z).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..=self.max_x)
            .flat_map(move |x| (min_z..=max_z).map(move |z| Cell::new(x, z)))
    }
}

/// Outcome recorded for one processed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOutcome {
    /// A placement request was issued and accepted
    Placed,
    /// The world already held the correct resource
    SkippedAlreadyCorrect,
    /// The cell could not be realized; carries a short reason
    Failed(String),
}

/// Record of one processed cell: coordinates, resolved color, outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// The processed cell
    pub cell: Cell,
    /// Color resolved for the cell
    pub color: Color,
    /// What happened
    pub outcome: CellOutcome,
}

/// Aggregate counts for one region run.
///
/// Owned by the orchestrator for the duration of a run and discarded
/// afterwards; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Cells where a placement was issued
    pub placed: u64,
    /// Cells that already held the correct resource
    pub skipped: u64,
    /// Cells that could not be realized
    pub failed: u64,
    /// Total cells processed
    pub processed: u64,
}

impl RunSummary {
    /// Record one cell outcome
    pub fn record(&mut self, outcome: &CellOutcome) {
        self.processed += 1;
        match outcome {
            CellOutcome::Placed => self.placed += 1,
            CellOutcome::SkippedAlreadyCorrect => self.skipped += 1,
            CellOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} placed, {} skipped, {} failed ({} processed)",
            self.placed, self.skipped, self.failed, self.processed
        )
    }
}

/// Lifecycle state of a region run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// No run has started yet
    Idle,
    /// A run is iterating cells
    Running,
    /// The last cell was processed (individual outcomes may still be failures)
    Completed,
    /// The run stopped early: precondition failure or operator stop
    Aborted,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_normalizes_reversed_corners() {
        let a = Region::from_corners(Cell::new(5, -2), Cell::new(-1, 7), 64);
        let b = Region::from_corners(Cell::new(-1, 7), Cell::new(5, -2), 64);

        assert_eq!(a, b);
        assert_eq!(a.min_x(), -1);
        assert_eq!(a.max_x(), 5);
        assert_eq!(a.min_z(), -2);
        assert_eq!(a.max_z(), 7);
    }

    #[test]
    fn region_iterates_row_major_ascending() {
        let region = Region::from_corners(Cell::new(1, 1), Cell::new(0, 0), 64);
        let cells: Vec<Cell> = region.cells().collect();

        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1),
            ]
        );
    }

    #[test]
    fn region_cell_count() {
        let region = Region::from_corners(Cell::new(0, 0), Cell::new(2, 3), 0);
        assert_eq!(region.cell_count(), 12);
        assert_eq!(region.rows(), 3);
    }

    #[test]
    fn face_from_reference_prefers_dominant_axis() {
        let target = BlockPos::new(0, 0, 0);

        assert_eq!(
            Face::from_reference(BlockPos::new(-1, 0, 0), target),
            Face::PosX
        );
        assert_eq!(
            Face::from_reference(BlockPos::new(1, 0, 0), target),
            Face::NegX
        );
        assert_eq!(
            Face::from_reference(BlockPos::new(0, -1, 0), target),
            Face::PosY
        );
        assert_eq!(
            Face::from_reference(BlockPos::new(0, 0, 1), target),
            Face::NegZ
        );
    }

    #[test]
    fn face_tie_breaks_x_over_y_over_z() {
        // Equal deltas on every axis: x wins.
        let face = Face::from_reference(BlockPos::new(-1, -1, -1), BlockPos::new(0, 0, 0));
        assert_eq!(face, Face::PosX);

        // Equal deltas on y and z, none on x: y wins.
        let face = Face::from_reference(BlockPos::new(0, -1, -1), BlockPos::new(0, 0, 0));
        assert_eq!(face, Face::PosY);
    }

    #[test]
    fn summary_records_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&CellOutcome::Placed);
        summary.record(&CellOutcome::SkippedAlreadyCorrect);
        summary.record(&CellOutcome::Failed("navigation timed out".into()));

        assert_eq!(summary.placed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 3);
    }
}
