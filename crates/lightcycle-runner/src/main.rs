mod error;
mod run;
mod tape;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lightcycle_sim::{SimConfig, Simulation};

use error::RunnerError;
use run::OutputFormat;
use tape::{InputSource, InputTape, Wanderer};

/// Ticks to run in wander mode when no limit is given.
const DEFAULT_WANDER_TICKS: usize = 600;

/// Replay directional input through the light-cycle simulation and print the
/// final snapshot.
#[derive(Debug, Parser)]
#[command(name = "lightcycle-runner", version, about)]
struct Cli {
    /// Simulation config (TOML). Without it, LIGHTCYCLE_CONFIG and
    /// config/lightcycle.toml are tried before the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input tape (JSON array of `{ "hold": [...], "ticks": n }` steps).
    #[arg(long, conflicts_with = "wander")]
    tape: Option<PathBuf>,

    /// Drive the pawn with seeded random input instead of a tape.
    #[arg(long)]
    wander: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<usize>,

    /// Snapshot encoding.
    #[arg(long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Write the snapshot here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pace ticks at the configured tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig, RunnerError> {
    match &cli.config {
        Some(path) => Ok(SimConfig::from_file(path)?),
        None => Ok(SimConfig::load()),
    }
}

fn load_source(cli: &Cli) -> Result<(InputSource, usize), RunnerError> {
    if let Some(seed) = cli.wander {
        let ticks = cli.ticks.unwrap_or(DEFAULT_WANDER_TICKS);
        return Ok((InputSource::Wander(Wanderer::new(seed)), ticks));
    }

    let tape = match &cli.tape {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| RunnerError::TapeRead {
                path: path.display().to_string(),
                source,
            })?;
            InputTape::from_json(&text).map_err(|source| RunnerError::TapeParse {
                path: path.display().to_string(),
                source,
            })?
        },
        None => InputTape::default(),
    };
    let ticks = cli.ticks.unwrap_or(tape.len());
    Ok((InputSource::Tape(tape), ticks))
}

fn execute(cli: &Cli) -> Result<(), RunnerError> {
    let config = load_config(cli)?;
    let (mut source, max_ticks) = load_source(cli)?;

    tracing::info!(
        cell_size = config.grid.cell_size(),
        speed = config.grid.speed(),
        turn_tolerance = config.grid.turn_tolerance(),
        tick_rate = config.tick_rate,
        realtime = cli.realtime,
        max_ticks,
        "Light-cycle run starting"
    );

    let pace = cli.realtime.then(|| config.tick_interval());
    let mut sim = Simulation::new(&config);
    run::run(&mut sim, &mut source, max_ticks, pace);

    let bytes = run::encode_snapshot(&sim.snapshot(), cli.output)?;
    match &cli.out {
        Some(path) => std::fs::write(path, &bytes)?,
        None => std::io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    if let Err(e) = execute(&cli) {
        tracing::error!(error = %e, "Light-cycle run failed");
        std::process::exit(1);
    }
}
