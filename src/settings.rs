//! Player preferences (volume levels)

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Which mix a sound belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// One-shot sound effects
    Effect,
    /// Looping music and ambience
    Music,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Effect => "Effect Volume",
            Channel::Music => "Music Volume",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects volume (0.0 - 1.0)
    pub effect_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            effect_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn volume(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Effect => self.effect_volume,
            Channel::Music => self.music_volume,
        }
    }

    /// Set a channel volume, clamped to [0, 1]. Non-finite values are rejected
    /// and leave the current volume untouched.
    pub fn set_volume(&mut self, channel: Channel, volume: f32) -> Result<f32, GameError> {
        if !volume.is_finite() {
            return Err(GameError::InvalidVolume(volume));
        }
        let volume = volume.clamp(0.0, 1.0);
        match channel {
            Channel::Effect => self.effect_volume = volume,
            Channel::Music => self.music_volume = volume,
        }
        Ok(volume)
    }
}
