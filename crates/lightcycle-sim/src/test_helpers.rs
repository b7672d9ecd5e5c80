//! Drivers and a reference trail model for tests.

use crate::grid::{Cell, Direction, PROGRESS_PER_CELL};
use crate::input::HeldDirections;
use crate::{Simulation, TickResult};

/// Run `n` ticks with the same held input.
pub fn run_ticks(sim: &mut Simulation, held: HeldDirections, n: usize) -> Vec<TickResult> {
    (0..n).map(|_| sim.tick(held)).collect()
}

/// Ticks needed to land exactly on the node `cells` ahead.
pub fn ticks_to_node(sim: &Simulation, cells: u32) -> usize {
    let remaining = cells * PROGRESS_PER_CELL - sim.pawn().progress;
    (remaining / sim.grid().speed()) as usize
}

/// Go straight, holding nothing, until the pawn sits on the node `cells` ahead.
pub fn travel(sim: &mut Simulation, cells: u32) -> Vec<TickResult> {
    let ticks = ticks_to_node(sim, cells);
    run_ticks(sim, HeldDirections::NONE, ticks)
}

/// Hold `direction` for one tick; the pawn must be on a node.
pub fn turn(sim: &mut Simulation, direction: Direction) -> TickResult {
    let result = sim.tick(HeldDirections::only(direction));
    assert!(
        result.turn.is_some(),
        "turn to {direction:?} was not accepted at {:?}",
        sim.pawn().cell
    );
    result
}

/// Trail kept as a list of turn waypoints, tested segment by segment.
///
/// The newest completed segment is skipped (the pawn is standing on its end)
/// and endpoints are inclusive, so touching a corner counts.
#[derive(Debug, Clone)]
pub struct WaypointTrail {
    points: Vec<Cell>,
}

impl WaypointTrail {
    pub fn new(start: Cell) -> Self {
        Self {
            points: vec![start],
        }
    }

    pub fn push_turn(&mut self, at: Cell) {
        self.points.push(at);
    }

    pub fn intersects(&self, pawn: Cell) -> bool {
        let segments = self.points.len().saturating_sub(1);
        self.points
            .windows(2)
            .take(segments.saturating_sub(1))
            .any(|pair| {
                let (a, b) = (pair[0], pair[1]);
                let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
                let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
                (min_x..=max_x).contains(&pawn.x) && (min_y..=max_y).contains(&pawn.y)
            })
    }
}

/// Drive `sim` through `script` (cells to travel, then an optional turn) while
/// mirroring every accepted turn into `waypoints`. Returns the first node the
/// waypoint model flagged, checked after every tick.
pub fn run_mirrored(
    sim: &mut Simulation,
    waypoints: &mut WaypointTrail,
    script: &[(u32, Option<Direction>)],
) -> Option<Cell> {
    let mut first_hit = None;
    let mut check = |sim: &Simulation, waypoints: &WaypointTrail| {
        if first_hit.is_none() && waypoints.intersects(sim.pawn().cell) {
            first_hit = Some(sim.pawn().cell);
        }
    };

    for &(cells, then) in script {
        for _ in 0..ticks_to_node(sim, cells) {
            sim.tick(HeldDirections::NONE);
            check(&*sim, &*waypoints);
        }
        if let Some(direction) = then {
            let result = sim.tick(HeldDirections::only(direction));
            if let Some(turn) = result.turn {
                waypoints.push_turn(turn.at);
            }
            check(&*sim, &*waypoints);
        }
    }
    first_hit
}
