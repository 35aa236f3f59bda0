//! Unified error handling for the shell.

use crate::config::ConfigError;

/// Application error type.
///
/// Only startup and stream failures surface here. A command that fails is
/// answered on stdout and the session carries on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] ledgerdb_engine::Error),
}

/// Result type alias for the shell.
pub type Result<T> = std::result::Result<T, AppError>;
