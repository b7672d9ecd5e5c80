use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction, GridConfig, PROGRESS_PER_CELL};
use crate::input::HeldDirections;
use crate::motion::{Arrival, enter_next_cell};
use crate::pawn::Pawn;
use crate::trail::TrailStore;

/// How the pawn was put back on the grid node when a turn was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snap {
    /// Already exactly on the node.
    None,
    /// Turned just before reaching the next node: moved forward onto it.
    Forward,
    /// Turned just after leaving the node: pulled back onto it.
    Back,
}

/// An accepted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Node the pawn pivoted on.
    pub at: Cell,
    pub from: Direction,
    pub to: Direction,
    pub snap: Snap,
    /// Set when the snap carried the pawn onto a new node. A forward snap
    /// past the edge of the coordinate range leaves this empty and crashes.
    pub arrival: Option<Arrival>,
}

/// Whether `progress` is close enough to a node to turn.
pub fn in_turn_window(progress: u32, grid: &GridConfig) -> bool {
    let behind = progress;
    let ahead = PROGRESS_PER_CELL - progress;
    behind <= grid.turn_tolerance() || ahead <= grid.turn_tolerance()
}

/// Pick the direction held input asks for.
///
/// Candidates are tried in priority order and the first held direction that
/// is not a reversal wins, even when it is the current direction (which
/// means "keep going"). Returns `None` when nothing changes.
pub fn select_direction(current: Direction, held: &HeldDirections) -> Option<Direction> {
    let wanted = held
        .in_priority_order()
        .find(|&candidate| candidate != current.opposite())?;
    (wanted != current).then_some(wanted)
}

/// Apply held input to the pawn if it is inside the turn window.
///
/// On success the pawn sits exactly on a node with zero progress and the new
/// direction is in effect for this tick's motion. The pivot node is always
/// already in the trail (the seed, or recorded on arrival), so the final
/// `record_if_absent` guards that invariant rather than doing a write.
pub fn try_turn(
    pawn: &mut Pawn,
    held: &HeldDirections,
    grid: &GridConfig,
    trail: &mut TrailStore,
    tick: u64,
) -> Option<Turn> {
    if pawn.is_crashed() || !in_turn_window(pawn.progress, grid) {
        return None;
    }
    let to = select_direction(pawn.direction, held)?;
    let from = pawn.direction;

    let (snap, arrival) = if pawn.progress == 0 {
        (Snap::None, None)
    } else if pawn.progress <= grid.turn_tolerance() {
        pawn.progress = 0;
        (Snap::Back, None)
    } else {
        pawn.progress = 0;
        (Snap::Forward, enter_next_cell(pawn, from, trail, tick))
    };

    trail.record_if_absent(pawn.cell, from, tick);
    pawn.direction = to;

    tracing::debug!(cell = ?pawn.cell, ?from, ?to, ?snap, tick, "Turn accepted");

    Some(Turn {
        at: pawn.cell,
        from,
        to,
        snap,
        arrival,
    })
}
