//! Error types for Kagami

use thiserror::Error;

/// Main error type for Kagami
#[derive(Error, Debug)]
pub enum KagamiError {
    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Solver input errors.
///
/// A landmark set with the wrong point count is an integration error on
/// the caller's side, so it is reported immediately rather than clamped
/// or index-wrapped. The face solver's iris check (478 vs 468 points) is
/// a feature-availability branch, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Landmark count mismatch: expected {expected}, got {got}")]
    LandmarkCount { expected: usize, got: usize },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Convenience result type alias
pub type Result<T> = std::result::Result<T, KagamiError>;
