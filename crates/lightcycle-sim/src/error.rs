use thiserror::Error;

/// Configuration rejected at construction time.
///
/// None of these can occur once a [`Simulation`](crate::Simulation) exists;
/// the tick path has no error returns.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell_size must be > 0")]
    ZeroCellSize,
    #[error("speed must be > 0")]
    ZeroSpeed,
    #[error("speed {speed} must be below one cell ({per_cell} progress units)")]
    SpeedNotBelowCell { speed: u32, per_cell: u32 },
    #[error("speed {speed} does not evenly divide one cell ({per_cell} progress units)")]
    SpeedDoesNotDivideCell { speed: u32, per_cell: u32 },
    #[error("turn_tolerance {tolerance} must be below half a cell ({half})")]
    ToleranceTooWide { tolerance: u32, half: u32 },
    #[error("tick_rate must be > 0")]
    ZeroTickRate,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
