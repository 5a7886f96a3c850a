//! Error types for profile operations

use thiserror::Error;

use super::validate::InvalidNameReason;
use crate::storage::DatabaseError;

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors surfaced by [`crate::ProfileManager`]
///
/// None of these are fatal. On any error the in-memory collection is left
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Name failed validation
    #[error("Invalid profile name '{name}': {reason}")]
    InvalidName {
        name: String,
        reason: InvalidNameReason,
    },

    /// No source connection given
    #[error("You must select a source connection for the profile")]
    ConnectionRequired,

    /// Source connection is not in the connection registry
    #[error("Unknown connection '{0}'")]
    UnknownConnection(String),

    /// No report given
    #[error("You must select a report for the profile")]
    ReportRequired,

    /// Another profile already uses this name (case-insensitive)
    #[error("Profile with the name '{0}' exists already. Please select another name")]
    DuplicateName(String),

    /// Profile to update does not exist
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// Persisting a change failed; nothing was changed
    #[error("Failed to write profile storage: {0}")]
    StorageWriteError(#[source] DatabaseError),

    /// Persisted state could not be read
    #[error("Profile storage unavailable: {0}")]
    StorageUnavailable(#[source] DatabaseError),
}

impl ProfileError {
    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "INVALID_NAME",
            Self::ConnectionRequired => "CONNECTION_REQUIRED",
            Self::UnknownConnection(_) => "UNKNOWN_CONNECTION",
            Self::ReportRequired => "REPORT_REQUIRED",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::StorageWriteError(_) => "STORAGE_WRITE_ERROR",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Whether the operator can fix this by changing their input
    ///
    /// Storage errors are the only ones worth retrying unchanged.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::StorageWriteError(_) | Self::StorageUnavailable(_)
        )
    }
}
