//! Player error types
//!
//! This module defines [`PlayerError`], the reasons a control request can be
//! turned down. None of them are fatal: a rejected request leaves the player
//! exactly as it was, and the caller is free to show the message and move on.

use std::fmt;

/// Reasons a player operation was ignored
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The weight did not parse to a finite, positive number
    InvalidWeight { input: String },

    /// Extraction needs at least one item in the heap
    EmptyHeap,

    /// An extraction run is already in progress
    AlreadyExtracting,

    /// No unplayed steps and nothing queued to build from
    NothingToPlay,

    /// No step left to apply
    NothingToStep,
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::InvalidWeight { input } => {
                write!(f, "'{}' is not a positive weight", input)
            }
            PlayerError::EmptyHeap => write!(f, "The heap is empty"),
            PlayerError::AlreadyExtracting => write!(f, "Extraction is already running"),
            PlayerError::NothingToPlay => write!(f, "Nothing to play: the input queue is empty"),
            PlayerError::NothingToStep => write!(f, "No more steps"),
        }
    }
}

impl std::error::Error for PlayerError {}

/// Parse a user-entered weight.
///
/// Accepts any finite number greater than zero, surrounding whitespace allowed.
pub fn parse_weight(input: &str) -> Result<f64, PlayerError> {
    match input.trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight > 0.0 => Ok(weight),
        _ => Err(PlayerError::InvalidWeight {
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("85"), Ok(85.0));
        assert_eq!(parse_weight(" 72.5 "), Ok(72.5));
        assert!(parse_weight("abc").is_err());
        assert!(parse_weight("").is_err());
        assert!(parse_weight("0").is_err());
        assert!(parse_weight("-4").is_err());
        assert!(parse_weight("NaN").is_err());
        assert!(parse_weight("inf").is_err());
    }
}
