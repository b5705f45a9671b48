//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be re-balanced from a
//! JSON file without recompiling. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::GameError;

/// Upper bound for `base_spawn_count` and `spawn_increase_rate`
pub const MAX_SPAWN_BATCH: u32 = 1000;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Spawning ===
    /// Spawn timer interval
    pub spawn_interval_ms: u32,
    /// Enemies per spawn tick at t=0
    pub base_spawn_count: u32,
    /// Extra enemies per spawn tick for each full minute elapsed
    pub spawn_increase_rate: u32,
    /// Distance outside the visible bounds where enemies appear
    pub spawn_margin: f32,
    /// Optional ceiling on live enemies (None = unbounded ramp)
    pub max_enemies: Option<usize>,

    // === Enemy ===
    pub enemy_max_life: i32,
    pub enemy_speed: f32,
    /// Half of the enemy body's side length
    pub enemy_half_size: f32,

    // === Player ===
    pub player_max_life: i32,
    pub player_speed: f32,
    /// Half of the player body's side length
    pub player_half_size: f32,

    // === Player attack ===
    pub attack_cooldown_ms: u32,
    pub attack_damage: i32,
    /// Side length of the square attack area
    pub attack_range: f32,
    /// How long the attack outline stays visible
    pub attack_visual_ms: u32,
    /// Damage multiplier bounds (uniform)
    pub damage_jitter_min: f64,
    pub damage_jitter_max: f64,
    pub enemy_hit_tint_ms: u32,
    pub damage_popup_ms: u32,

    // === Rewards / progression ===
    pub kill_score: u64,
    pub kill_experience: u32,
    pub initial_experience_to_next: u32,
    pub experience_growth: f64,

    // === Contact damage ===
    pub contact_damage: i32,
    pub invincibility_ms: u32,
    pub knockback_distance: f32,

    // === Upgrades ===
    pub upgrade_attack_damage: i32,
    pub upgrade_attack_range: f32,
    pub upgrade_move_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            spawn_interval_ms: 3000,
            base_spawn_count: 1,
            spawn_increase_rate: 1,
            spawn_margin: 50.0,
            max_enemies: None,

            enemy_max_life: 50,
            enemy_speed: 50.0,
            enemy_half_size: 16.0,

            player_max_life: 100,
            player_speed: 100.0,
            player_half_size: 16.0,

            attack_cooldown_ms: 1800,
            attack_damage: 30,
            attack_range: 150.0,
            attack_visual_ms: 200,
            damage_jitter_min: 0.9,
            damage_jitter_max: 1.1,
            enemy_hit_tint_ms: 100,
            damage_popup_ms: 500,

            kill_score: 50,
            kill_experience: 30,
            initial_experience_to_next: 100,
            experience_growth: 1.5,

            contact_damage: 10,
            invincibility_ms: 1000,
            knockback_distance: 50.0,

            upgrade_attack_damage: 10,
            upgrade_attack_range: 50.0,
            upgrade_move_speed: 20.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: &str| {
            log::warn!("Rejected tuning: {}", msg);
            Err(GameError::InvalidTuning(msg.to_string()))
        };

        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return fail("world dimensions must be positive");
        }
        if self.spawn_interval_ms == 0 {
            return fail("spawn interval must be positive");
        }
        if self.attack_cooldown_ms == 0 {
            return fail("attack cooldown must be positive");
        }
        if self.enemy_max_life <= 0 || self.player_max_life <= 0 {
            return fail("max life must be positive");
        }
        if self.initial_experience_to_next == 0 {
            return fail("experience threshold must be positive");
        }
        if self.experience_growth.is_nan() || self.experience_growth < 1.0 {
            return fail("experience growth must be at least 1.0");
        }
        if self.damage_jitter_min <= 0.0 || self.damage_jitter_min > self.damage_jitter_max {
            return fail("damage jitter bounds must satisfy 0 < min <= max");
        }
        if self.base_spawn_count > MAX_SPAWN_BATCH || self.spawn_increase_rate > MAX_SPAWN_BATCH {
            return fail("spawn batch sizes must not exceed 1000");
        }
        if self.max_enemies == Some(0) {
            return fail("max enemies must be positive when set");
        }
        Ok(())
    }
}
