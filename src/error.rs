//! Error types for board construction and configuration loading

use thiserror::Error;

/// Errors raised while building or mutating a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Rows and columns must both be at least one.
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    EmptyDimension { rows: usize, cols: usize },
    /// Direct placement onto a cell that already holds an occupant.
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// Errors raised while loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
