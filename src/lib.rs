//! Solitary Struggle - an arena survival game
//!
//! Core modules:
//! - `sim`: Simulation (player, enemies, combat, progression, timers)
//! - `tuning`: Data-driven game balance
//! - `settings`: Volume preferences
//! - `ui`: Volume overlay and HUD text
//! - `render`: Draw commands handed to the host renderer
//! - `audio`: Sound emitter boundary and cue routing
//! - `game`: Frame driver tying the pieces together

pub mod audio;
pub mod error;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::GameError;
pub use game::{Game, GameInput};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (100 Hz)
    pub const SIM_DT_MS: u32 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default canvas dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Life bar geometry (drawn below each body)
    pub const LIFE_BAR_WIDTH: f32 = 50.0;
    pub const LIFE_BAR_HEIGHT: f32 = 5.0;
    pub const LIFE_BAR_OFFSET_Y: f32 = 40.0;

    /// Number of stars in the level-up burst
    pub const SPARKLE_COUNT: usize = 50;
    /// Star fade duration
    pub const SPARKLE_FADE_MS: u32 = 1000;
}

/// Angle from `from` toward `to` (radians)
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert milliseconds to seconds for physics integration
#[inline]
pub fn ms_to_secs(ms: u32) -> f32 {
    ms as f32 / 1000.0
}
