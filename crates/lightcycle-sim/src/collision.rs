use crate::grid::Cell;
use crate::motion::Arrival;
use crate::pawn::Pawn;
use crate::trail::{TrailMark, TrailStore};

/// Whether arriving with `arrival` on a cell marked `mark` is a crash.
///
/// The mark must predate this tick (the entry the arrival itself just wrote
/// never counts) and lie across the arrival heading. Running over earlier
/// track on the same axis is allowed in either direction.
pub fn is_crossing(mark: &TrailMark, arrival: &Arrival, tick: u64) -> bool {
    mark.tick < tick && !mark.direction.is_parallel(arrival.heading)
}

/// Test the node the pawn arrived at this tick against the trail.
///
/// Only arrivals are tested; between nodes the pawn is on its own approach
/// edge. Sets `crash_point` at most once and returns it when it fires.
pub fn detect(
    pawn: &mut Pawn,
    trail: &TrailStore,
    arrival: Option<&Arrival>,
    tick: u64,
) -> Option<Cell> {
    if pawn.is_crashed() {
        return None;
    }
    let arrival = arrival?;
    let mark = trail.lookup(arrival.cell)?;
    if !is_crossing(mark, arrival, tick) {
        return None;
    }

    pawn.crash_point = Some(arrival.cell);
    tracing::info!(
        cell = ?arrival.cell,
        heading = ?arrival.heading,
        earlier = ?mark.direction,
        tick,
        "Pawn crashed into its own trail"
    );
    Some(arrival.cell)
}
