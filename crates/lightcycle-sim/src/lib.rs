pub mod collision;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod motion;
pub mod pawn;
pub mod render;
pub mod trail;
pub mod turn_gate;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use serde::{Deserialize, Serialize};

pub use config::{SimConfig, StartConfig};
pub use error::ConfigError;
pub use grid::{Axis, Cell, Direction, GridConfig, PROGRESS_PER_CELL};
pub use input::{HeldDirections, TURN_PRIORITY};
pub use motion::Arrival;
pub use pawn::{Pawn, PawnStatus};
pub use render::Snapshot;
pub use trail::{TrailEdge, TrailMark, TrailStore};
pub use turn_gate::{Snap, Turn};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Tick number this result belongs to (the first tick is 1).
    pub tick: u64,
    pub turn: Option<Turn>,
    /// Node entered this tick, by a forward snap or by motion.
    pub arrival: Option<Arrival>,
    /// Set only on the tick the crash was detected.
    pub crashed_at: Option<Cell>,
    pub status: PawnStatus,
}

/// A single light-cycle run: the pawn, its trail and the grid it moves on.
///
/// [`Simulation::tick`] is the only mutator. Readers look at the state
/// between ticks through the accessors or [`Simulation::snapshot`].
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: GridConfig,
    pawn: Pawn,
    trail: TrailStore,
    tick: u64,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_start(config.grid, config.start.cell, config.start.direction)
    }

    /// Start a run with the trail seeded at `cell`.
    pub fn with_start(grid: GridConfig, cell: Cell, direction: Direction) -> Self {
        Self {
            grid,
            pawn: Pawn::new(cell, direction),
            trail: TrailStore::seeded(cell, direction),
            tick: 0,
        }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn pawn(&self) -> &Pawn {
        &self.pawn
    }

    pub fn trail(&self) -> &TrailStore {
        &self.trail
    }

    /// Ticks executed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> PawnStatus {
        self.pawn.status()
    }

    pub fn crash_point(&self) -> Option<Cell> {
        self.pawn.crash_point
    }

    pub fn snapshot(&self) -> Snapshot {
        render::snapshot(self.tick, &self.pawn, &self.trail, &self.grid)
    }

    /// Run one step: turn gate, then motion, then collision.
    ///
    /// Once the pawn has crashed the run is frozen: the tick counter stops
    /// and every call reports the latched state without touching anything.
    pub fn tick(&mut self, held: HeldDirections) -> TickResult {
        if self.pawn.is_crashed() {
            return TickResult {
                tick: self.tick,
                turn: None,
                arrival: None,
                crashed_at: None,
                status: PawnStatus::Crashed,
            };
        }

        self.tick += 1;
        let tick = self.tick;

        let turn = turn_gate::try_turn(&mut self.pawn, &held, &self.grid, &mut self.trail, tick);
        let moved = motion::advance(&mut self.pawn, &self.grid, &mut self.trail, tick);
        let arrival = turn.and_then(|t| t.arrival).or(moved);
        collision::detect(&mut self.pawn, &self.trail, arrival.as_ref(), tick);
        // Alive on entry, so any crash point now was latched this tick, by
        // the detector or by running off the coordinate range.
        let crashed_at = self.pawn.crash_point;

        TickResult {
            tick,
            turn,
            arrival,
            crashed_at,
            status: self.pawn.status(),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}
