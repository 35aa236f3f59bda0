//! Error types for the ledgerdb engine.

use crate::CollectionName;
use thiserror::Error;

/// All possible errors from the ledgerdb engine.
///
/// Reads never fail: absence of matches is an empty list, `0` or `None`.
/// Only mutations that target a missing record, and envelopes that cannot be
/// decoded at all, produce an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `update`/`delete` found no record satisfying the where clause.
    #[error("{0} not found")]
    NotFound(CollectionName),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}

impl Error {
    /// Stable, machine-readable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "notFound",
            Error::InvalidQuery(_) => "invalidQuery",
            Error::InvalidFixture(_) => "invalidFixture",
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
