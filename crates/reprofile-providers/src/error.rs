//! Error types for report sources

use std::time::Duration;
use thiserror::Error;

/// A remote report service could not deliver its report list
#[derive(Debug, Error)]
pub enum RemoteFault {
    /// Request never got a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("Report service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a report list
    #[error("Failed to decode report list: {0}")]
    Decode(String),

    /// Connection settings are unusable
    #[error("Connection configuration error: {0}")]
    Configuration(String),
}

/// A cancellable fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Remote(#[from] RemoteFault),

    #[error("Report fetch timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Storage(#[from] reprofile_core::ProfileError),
}

impl From<reqwest::Error> for RemoteFault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
