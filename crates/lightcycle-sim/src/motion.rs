use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction, GridConfig, PROGRESS_PER_CELL};
use crate::pawn::Pawn;
use crate::trail::TrailStore;

/// The pawn reached a new grid node this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    pub cell: Cell,
    /// Direction of travel while entering `cell`.
    pub heading: Direction,
    /// Whether this arrival created the trail entry for `cell`.
    pub first_visit: bool,
}

/// Step the pawn from its node onto the neighbour along `heading`, recording
/// the new node and the edge in the trail.
///
/// A step past the edge of the coordinate range latches a crash on the
/// current node instead, and the pawn stays there.
pub(crate) fn enter_next_cell(
    pawn: &mut Pawn,
    heading: Direction,
    trail: &mut TrailStore,
    tick: u64,
) -> Option<Arrival> {
    let from = pawn.cell;
    let Some(next) = from.checked_step(heading) else {
        pawn.crash_point = Some(from);
        tracing::warn!(cell = ?from, ?heading, tick, "Pawn ran off the addressable grid");
        return None;
    };
    pawn.cell = next;
    let first_visit = trail.record_if_absent(next, heading, tick);
    trail.record_edge(from, next);
    tracing::trace!(cell = ?next, ?heading, first_visit, tick, "Pawn entered cell");
    Some(Arrival {
        cell: next,
        heading,
        first_visit,
    })
}

/// Advance the pawn `speed` progress units along its direction.
/// Returns the node entered if a cell boundary was crossed.
pub fn advance(
    pawn: &mut Pawn,
    grid: &GridConfig,
    trail: &mut TrailStore,
    tick: u64,
) -> Option<Arrival> {
    if pawn.is_crashed() {
        return None;
    }

    pawn.progress += grid.speed();
    if pawn.progress < PROGRESS_PER_CELL {
        return None;
    }

    // speed divides a cell, so this is always exactly zero
    pawn.progress -= PROGRESS_PER_CELL;
    let heading = pawn.direction;
    enter_next_cell(pawn, heading, trail, tick)
}
