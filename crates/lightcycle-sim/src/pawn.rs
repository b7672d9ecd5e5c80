use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction, GridConfig, PROGRESS_PER_CELL};

/// Alive until the collision detector fires, then crashed for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnStatus {
    Alive,
    Crashed,
}

/// The single light-cycle.
///
/// Position is held as the grid node most recently crossed plus the progress
/// made from it toward the next node along `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    pub cell: Cell,
    /// Progress units past `cell`, always in `0..PROGRESS_PER_CELL`.
    pub progress: u32,
    pub direction: Direction,
    /// Set once by the collision detector, never cleared.
    pub crash_point: Option<Cell>,
}

impl Pawn {
    pub fn new(cell: Cell, direction: Direction) -> Self {
        Self {
            cell,
            progress: 0,
            direction,
            crash_point: None,
        }
    }

    pub fn status(&self) -> PawnStatus {
        if self.crash_point.is_some() {
            PawnStatus::Crashed
        } else {
            PawnStatus::Alive
        }
    }

    pub fn is_crashed(&self) -> bool {
        self.crash_point.is_some()
    }

    /// Exact position in progress units (`PROGRESS_PER_CELL` per cell).
    pub fn progress_position(&self) -> (i64, i64) {
        let per_cell = i64::from(PROGRESS_PER_CELL);
        let (dx, dy) = self.direction.vector();
        let progress = i64::from(self.progress);
        (
            i64::from(self.cell.x) * per_cell + progress * i64::from(dx),
            i64::from(self.cell.y) * per_cell + progress * i64::from(dy),
        )
    }

    /// Continuous pixel position.
    pub fn world_position(&self, grid: &GridConfig) -> (f32, f32) {
        let cell_size = grid.cell_size() as f32;
        let along = self.progress as f32 * cell_size / PROGRESS_PER_CELL as f32;
        let (dx, dy) = self.direction.vector();
        (
            self.cell.x as f32 * cell_size + along * dx as f32,
            self.cell.y as f32 * cell_size + along * dy as f32,
        )
    }

    /// Nearest grid node to the pixel position, rounding half-way up.
    pub fn nearest_cell(&self) -> Cell {
        if self.progress * 2 >= PROGRESS_PER_CELL {
            self.cell.checked_step(self.direction).unwrap_or(self.cell)
        } else {
            self.cell
        }
    }
}
