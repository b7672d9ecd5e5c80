//! End-to-end runs of the tick loop through the public API.

use lightcycle_sim::{
    Cell, Direction, GridConfig, HeldDirections, PROGRESS_PER_CELL, PawnStatus, SimConfig,
    Simulation, Snap, TickResult,
};

fn idle(sim: &mut Simulation, ticks: usize) -> Vec<TickResult> {
    (0..ticks).map(|_| sim.tick(HeldDirections::NONE)).collect()
}

/// Straight ahead until the pawn lands on the node `cells` ahead.
fn travel(sim: &mut Simulation, cells: u32) -> Vec<TickResult> {
    let remaining = cells * PROGRESS_PER_CELL - sim.pawn().progress;
    idle(sim, (remaining / sim.grid().speed()) as usize)
}

fn hold(sim: &mut Simulation, direction: Direction) -> TickResult {
    sim.tick(HeldDirections::only(direction))
}

// ================================================================
// Scenario A: progress, boundary crossing and a snapped turn
// ================================================================

#[test]
fn scenario_a_progress_and_turn() {
    let mut sim = Simulation::with_start(
        GridConfig::new(40, 4, 5).unwrap(),
        Cell::new(1, 1),
        Direction::Right,
    );

    idle(&mut sim, 10);
    assert_eq!(sim.pawn().progress, 40);
    assert_eq!(sim.pawn().cell, Cell::new(1, 1));

    idle(&mut sim, 14);
    assert_eq!(sim.pawn().progress, 96, "one tick short of the boundary");

    let result = hold(&mut sim, Direction::Down);

    let turn = result.turn.expect("turn within tolerance is accepted");
    assert_eq!(turn.from, Direction::Right);
    assert_eq!(turn.to, Direction::Down);
    assert_eq!(turn.snap, Snap::Forward);
    assert_eq!(turn.at, Cell::new(2, 1));
    assert_eq!(sim.pawn().cell, Cell::new(2, 1));
    assert_eq!(sim.pawn().direction, Direction::Down);
    assert_eq!(
        sim.trail().direction_at(Cell::new(2, 1)),
        Some(Direction::Right)
    );
}

#[test]
fn scenario_a_wraps_after_25_ticks() {
    let mut sim = Simulation::default();
    let results = idle(&mut sim, 25);

    assert!(results[..24].iter().all(|r| r.arrival.is_none()));
    assert_eq!(results[24].arrival.map(|a| a.cell), Some(Cell::new(2, 1)));
    assert_eq!(sim.pawn().cell, Cell::new(2, 1));
    assert_eq!(sim.pawn().progress, 0);
}

#[test]
fn turn_outside_window_is_ignored() {
    let mut sim = Simulation::default();
    idle(&mut sim, 10);

    for _ in 0..10 {
        let result = hold(&mut sim, Direction::Down);
        assert!(result.turn.is_none());
    }
    assert_eq!(sim.pawn().direction, Direction::Right);
}

#[test]
fn reversal_never_accepted() {
    let mut sim = Simulation::default();
    for _ in 0..200 {
        let result = hold(&mut sim, Direction::Left);
        assert!(result.turn.is_none());
        assert_eq!(sim.pawn().direction, Direction::Right);
    }
    assert_eq!(sim.status(), PawnStatus::Alive);
}

#[test]
fn held_key_turns_on_first_aligned_tick() {
    // Level-triggered: holding Down from the start turns immediately,
    // since the pawn begins exactly on a node.
    let mut sim = Simulation::default();
    let result = hold(&mut sim, Direction::Down);

    let turn = result.turn.unwrap();
    assert_eq!(turn.snap, Snap::None);
    assert_eq!(turn.at, Cell::new(1, 1));
    assert_eq!(sim.pawn().progress, 4);
}

// ================================================================
// Scenario B: closing a loop onto earlier perpendicular track
// ================================================================

#[test]
fn scenario_b_closed_loop_crashes_once() {
    let mut sim = Simulation::default();

    travel(&mut sim, 2);
    hold(&mut sim, Direction::Down);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Left);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Up);
    let results = travel(&mut sim, 2);

    let crashes: Vec<_> = results.iter().filter_map(|r| r.crashed_at).collect();
    assert_eq!(crashes, vec![Cell::new(1, 1)]);
    assert_eq!(sim.crash_point(), Some(Cell::new(1, 1)));
    assert_eq!(sim.status(), PawnStatus::Crashed);
}

#[test]
fn scenario_b_crossing_first_turn_cell() {
    // Turn at (3,1), zig round through (2,2) and (2,3), then come back up
    // column 3: (3,2) was laid on the same axis, (3,1) was entered moving
    // right and is crossed moving up.
    let mut sim = Simulation::default();

    travel(&mut sim, 2);
    hold(&mut sim, Direction::Down);
    travel(&mut sim, 1);
    hold(&mut sim, Direction::Left);
    travel(&mut sim, 1);
    hold(&mut sim, Direction::Down);
    travel(&mut sim, 1);
    hold(&mut sim, Direction::Right);
    travel(&mut sim, 1);
    hold(&mut sim, Direction::Up);

    let first_leg = travel(&mut sim, 1);
    assert!(first_leg.iter().all(|r| r.crashed_at.is_none()));
    assert_eq!(sim.pawn().cell, Cell::new(3, 2));

    let second_leg = travel(&mut sim, 1);
    assert_eq!(
        second_leg.last().and_then(|r| r.crashed_at),
        Some(Cell::new(3, 1))
    );
    assert_eq!(sim.crash_point(), Some(Cell::new(3, 1)));
}

// ================================================================
// Scenario C: straight run over fresh cells
// ================================================================

#[test]
fn scenario_c_straight_run() {
    let mut sim = Simulation::default();
    let results = travel(&mut sim, 20);

    assert!(results.iter().all(|r| r.crashed_at.is_none()));
    assert_eq!(sim.trail().len(), 21);
    assert!(
        sim.trail()
            .iter()
            .all(|(_, mark)| mark.direction == Direction::Right)
    );
    assert_eq!(sim.pawn().cell, Cell::new(21, 1));
}

#[test]
fn straight_over_own_track_same_direction_is_safe() {
    // Lay a row moving right, loop round below it, then run the same row
    // moving right again from further left.
    let mut sim = Simulation::with_start(GridConfig::default(), Cell::new(2, 0), Direction::Right);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Down);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Left);
    travel(&mut sim, 4);
    hold(&mut sim, Direction::Up);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Right);

    // Now at (0,0) heading right: (1,0) is fresh, then (2,0)..(4,0) were
    // laid moving right.
    let results = travel(&mut sim, 3);
    assert!(results.iter().all(|r| r.crashed_at.is_none()));
    assert_eq!(sim.pawn().cell, Cell::new(3, 0));
    assert_eq!(sim.status(), PawnStatus::Alive);
}

// ================================================================
// Idempotence after the crash
// ================================================================

#[test]
fn crash_point_stays_put() {
    let mut sim = Simulation::default();
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Down);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Left);
    travel(&mut sim, 2);
    hold(&mut sim, Direction::Up);
    travel(&mut sim, 2);

    let crash = sim.crash_point().unwrap();
    let snapshot = serde_json::to_vec(&sim.snapshot()).unwrap();

    for i in 0..500 {
        let held = HeldDirections::only(Direction::ALL[i % 4]);
        let result = sim.tick(held);
        assert!(result.crashed_at.is_none());
        assert_eq!(sim.crash_point(), Some(crash));
    }
    assert_eq!(serde_json::to_vec(&sim.snapshot()).unwrap(), snapshot);
}

#[test]
fn config_drives_start() {
    let config = SimConfig::from_toml_str(
        r#"
        [grid]
        speed = 10

        [start]
        cell = { x = 5, y = 5 }
        direction = "left"
        "#,
    )
    .unwrap();
    let mut sim = Simulation::new(&config);

    idle(&mut sim, 10);

    assert_eq!(sim.pawn().cell, Cell::new(4, 5));
    assert_eq!(sim.trail().direction_at(Cell::new(4, 5)), Some(Direction::Left));
}

#[test]
fn start_on_coordinate_edge_crashes_instead_of_overflowing() {
    let config = SimConfig::from_toml_str(
        r#"
        [start]
        cell = { x = 2147483647, y = 0 }
        direction = "right"
        "#,
    )
    .unwrap();
    let mut sim = Simulation::new(&config);

    let results = idle(&mut sim, 25);

    let edge = Cell::new(i32::MAX, 0);
    assert!(results[..24].iter().all(|r| r.crashed_at.is_none()));
    assert_eq!(results[24].crashed_at, Some(edge));
    assert_eq!(results[24].arrival, None);
    assert_eq!(sim.status(), PawnStatus::Crashed);
    assert_eq!(sim.pawn().cell, edge);

    let frozen = sim.tick_count();
    idle(&mut sim, 10);
    assert_eq!(sim.tick_count(), frozen);
}

// ================================================================
// Property-based tests (proptest)
// ================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn held() -> impl Strategy<Value = HeldDirections> {
        (
            proptest::bool::ANY,
            proptest::bool::ANY,
            proptest::bool::ANY,
            proptest::bool::ANY,
        )
            .prop_map(|(up, right, down, left)| HeldDirections {
                up,
                right,
                down,
                left,
            })
    }

    proptest! {
        #[test]
        fn tick_invariants_hold(inputs in proptest::collection::vec(held(), 1..600)) {
            let mut sim = Simulation::default();
            let grid = *sim.grid();
            let mut latched: Option<Cell> = None;

            for held in inputs {
                let before = sim.pawn().clone();
                let result = sim.tick(held);
                let after = sim.pawn();

                // Never reverse.
                prop_assert_ne!(after.direction, before.direction.opposite());

                if let Some(turn) = result.turn {
                    let ahead = PROGRESS_PER_CELL - before.progress;
                    prop_assert!(
                        before.progress <= grid.turn_tolerance()
                            || ahead <= grid.turn_tolerance()
                    );
                    prop_assert_eq!(turn.from, before.direction);
                } else if before.crash_point.is_none() {
                    prop_assert_eq!(after.direction, before.direction);
                    let (bx, by) = before.progress_position();
                    let (ax, ay) = after.progress_position();
                    let (dx, dy) = before.direction.vector();
                    let step = i64::from(grid.speed());
                    prop_assert_eq!((ax - bx, ay - by), (step * i64::from(dx), step * i64::from(dy)));
                }

                prop_assert!(sim.trail().contains(after.cell));

                // Crash point latches exactly once.
                match latched {
                    Some(cell) => {
                        prop_assert_eq!(after.crash_point, Some(cell));
                        prop_assert!(result.crashed_at.is_none());
                    },
                    None => {
                        latched = after.crash_point;
                        prop_assert_eq!(result.crashed_at, after.crash_point);
                    },
                }
            }
        }
    }
}
