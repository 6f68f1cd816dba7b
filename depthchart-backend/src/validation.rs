/// Request-level checks applied at the HTTP boundary, before the store is called
use thiserror::Error;

/// Longest player name accepted over HTTP
pub const MAX_PLAYER_NAME_LEN: usize = 64;

/// Longest league/team/position path segment accepted over HTTP
pub const MAX_SEGMENT_LEN: usize = 16;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Player name too long (max 64 characters, got {0})")]
    PlayerNameTooLong(usize),

    #[error("Player name contains control characters")]
    PlayerNameInvalidChars,

    #[error("{field} too long (max 16 characters, got {len})")]
    SegmentTooLong { field: &'static str, len: usize },

    #[error("{field} contains invalid characters (only letters, digits and spaces allowed)")]
    SegmentInvalidChars { field: &'static str },
}

/// Validates a player name supplied in a request body
///
/// Rules:
/// - Max 64 characters
/// - No control characters
///
/// Blank names are left to the store, which rejects them as invalid players.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len > MAX_PLAYER_NAME_LEN {
        return Err(ValidationError::PlayerNameTooLong(len));
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::PlayerNameInvalidChars);
    }

    Ok(())
}

/// Validates a league/team/position path segment
///
/// Rules:
/// - Max 16 characters
/// - Only alphanumeric characters and spaces (spaces are trimmed later)
pub fn validate_segment(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_SEGMENT_LEN {
        return Err(ValidationError::SegmentTooLong { field, len });
    }

    if !value.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(ValidationError::SegmentInvalidChars { field });
    }

    Ok(())
}
