use thiserror::Error;

use lightcycle_sim::ConfigError;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read tape {path}: {source}")]
    TapeRead {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid tape {path}: {source}")]
    TapeParse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
