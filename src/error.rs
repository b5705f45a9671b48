//! Error types for loading configuration and applying settings.
//!
//! Gameplay itself never fails: invalid states are prevented by
//! precondition checks inside the simulation.

use std::io;

/// Main error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Volume must be a finite number, got {0}")]
    InvalidVolume(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::InvalidVolume(f32::NAN);
        assert_eq!(err.to_string(), "Volume must be a finite number, got NaN");

        let err = GameError::InvalidTuning("spawn interval must be positive".into());
        assert!(err.to_string().contains("spawn interval"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: GameError = json_err.into();
        assert!(matches!(err, GameError::Config(_)));
    }
}
