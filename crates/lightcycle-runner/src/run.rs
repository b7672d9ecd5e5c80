use std::time::{Duration, Instant};

use lightcycle_sim::{Cell, PawnStatus, Simulation, Snapshot};

use crate::error::RunnerError;
use crate::tape::InputSource;

/// How the snapshot is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Msgpack,
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub turns: u32,
    pub cells_visited: usize,
    pub status: PawnStatus,
    pub crash_point: Option<Cell>,
}

/// Tick `sim` with input from `source` until `max_ticks` or the first crash.
///
/// With `pace` set, each tick starts no earlier than one interval after the
/// previous one's deadline; without it the run goes as fast as it can.
pub fn run(
    sim: &mut Simulation,
    source: &mut InputSource,
    max_ticks: usize,
    pace: Option<Duration>,
) -> RunSummary {
    let mut turns = 0;
    let mut deadline = Instant::now();
    for i in 0..max_ticks {
        if let Some(interval) = pace {
            deadline += interval;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }

        let result = sim.tick(source.frame(i));
        if result.turn.is_some() {
            turns += 1;
        }
        if let Some(cell) = result.crashed_at {
            tracing::info!(tick = result.tick, x = cell.x, y = cell.y, "Run ended in a crash");
            break;
        }
    }

    let summary = RunSummary {
        ticks: sim.tick_count(),
        turns,
        cells_visited: sim.trail().len(),
        status: sim.status(),
        crash_point: sim.crash_point(),
    };
    tracing::info!(
        ticks = summary.ticks,
        turns = summary.turns,
        cells = summary.cells_visited,
        status = ?summary.status,
        crash_point = ?summary.crash_point,
        "Run finished"
    );
    summary
}

pub fn encode_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<Vec<u8>, RunnerError> {
    match format {
        OutputFormat::Json => {
            let mut bytes =
                serde_json::to_vec_pretty(snapshot).map_err(|e| RunnerError::Encode(e.to_string()))?;
            bytes.push(b'\n');
            Ok(bytes)
        },
        OutputFormat::Msgpack => {
            rmp_serde::to_vec_named(snapshot).map_err(|e| RunnerError::Encode(e.to_string()))
        },
    }
}
