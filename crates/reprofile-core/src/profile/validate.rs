//! Profile name validation
//!
//! Profile names are used verbatim as file and folder names, so they
//! must be safe path components on common filesystems.

use thiserror::Error;

/// Characters a profile name must not contain
pub const ILLEGAL_CHARACTERS: &[char] = &[' ', '\\', '/', '>', '<', '?', '*', ':', '|', '"', '\''];

/// Why a profile name was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidNameReason {
    /// Empty or whitespace-only
    #[error("name is mandatory")]
    Empty,

    /// Contains a character from [`ILLEGAL_CHARACTERS`]
    #[error("name must not contain spaces nor any of \\/<>?*:|\"' (found {0:?})")]
    IllegalCharacter(char),
}

/// Validate a profile name
///
/// # Errors
/// Returns the first rule the name breaks
pub fn validate_name(name: &str) -> Result<(), InvalidNameReason> {
    if name.trim().is_empty() {
        return Err(InvalidNameReason::Empty);
    }

    if let Some(c) = name.chars().find(|c| ILLEGAL_CHARACTERS.contains(c)) {
        return Err(InvalidNameReason::IllegalCharacter(c));
    }

    Ok(())
}
