//! Error types for skyevents.

use thiserror::Error;

/// Errors that can occur while gathering sky events.
#[derive(Error, Debug)]
pub enum SkyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("HTTP {status} fetching {year} feed")]
    FeedStatus { year: i32, status: u16 },

    #[error("Could not reach {year} feed: {reason}")]
    FeedUnreachable { year: i32, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for skyevents operations.
pub type SkyResult<T> = Result<T, SkyError>;
