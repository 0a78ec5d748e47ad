//! Error types for the reviewer assignment engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for engine operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed rotation document
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reviewer timezone is not a known IANA zone
    #[error("Invalid timezone {timezone:?} for reviewer {reviewer}")]
    InvalidTimezone { reviewer: String, timezone: String },

    /// Vacation date is neither the placeholder nor `YYYY/MM/DD`
    #[error("Invalid vacation date {value:?} for reviewer {reviewer}, expected YYYY/MM/DD")]
    InvalidDate { reviewer: String, value: String },

    /// Vacation ends before it starts
    #[error("Vacation for reviewer {reviewer} ends ({end}) before it starts ({start})")]
    InvalidVacation {
        reviewer: String,
        start: String,
        end: String,
    },

    /// Every reviewer is excluded or on vacation
    #[error("No reviewer available")]
    NoReviewerAvailable,

    /// A call to the code host failed
    #[error("Code host error: {0}")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a collaborator failure
    pub fn host<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Host(Box::new(err))
    }
}
