//! Error types and Result alias for the Tally economy

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Main error type for the Tally economy core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Daily reward on cooldown, next claim at {next_claim}")]
    Cooldown { next_claim: DateTime<Utc> },

    #[error("Insufficient points: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Unknown gift card: {0}")]
    UnknownCard(String),

    #[error("No gift cards to convert")]
    NothingToConvert,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}
