//! Configuration management for the shell.

use std::env;
use std::path::PathBuf;

/// Shell configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Fixture file seeding the store at startup
    pub fixtures_path: Option<PathBuf>,
    /// Pretty-print responses
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let fixtures_path = lookup("LEDGERDB_FIXTURES")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let pretty = match lookup("LEDGERDB_PRETTY") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidPretty(value))?,
        };

        Ok(Self {
            fixtures_path,
            pretty,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid LEDGERDB_PRETTY value: {0:?} (expected true, false, 1 or 0)")]
    InvalidPretty(String),
}
