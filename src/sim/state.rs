//! Game state and core simulation types
//!
//! Everything the update loop mutates lives in [`GameState`]; subsystems
//! receive it by reference instead of reaching into shared scene fields.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::{Progression, UpgradeChoice, UpgradeMenu};
use super::rect::Rect;
use super::timer::{RepeatingTimer, Schedule};
use crate::consts::{SPARKLE_COUNT, SPARKLE_FADE_MS};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for any key
    Title,
    /// Active gameplay
    Playing,
    /// Simulation suspended while an upgrade is chosen
    LevelUp,
    /// Run ended, waiting for retry
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: i32,
    pub max_life: i32,
    /// Movement speed (pixels/sec)
    pub speed: f32,
    pub attack_damage: i32,
    /// Side of the square attack area
    pub attack_range: f32,
    pub half_size: f32,
    /// Contact damage is ignored while set
    pub invincible: bool,
    /// Attack outline currently visible
    pub attacking: bool,
    /// Red hit tint
    pub tinted: bool,
    /// Bumped on every session reset so stale player effects are dropped
    pub generation: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0),
            vel: Vec2::ZERO,
            life: tuning.player_max_life,
            max_life: tuning.player_max_life,
            speed: tuning.player_speed,
            attack_damage: tuning.attack_damage,
            attack_range: tuning.attack_range,
            half_size: tuning.player_half_size,
            invincible: false,
            attacking: false,
            tinted: false,
            generation: 0,
        }
    }

    /// Body bounds used for contact checks
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.half_size))
    }

    /// Square attack area centered on the player
    pub fn attack_area(&self) -> Rect {
        Rect::square(self.pos, self.attack_range)
    }

    /// Life as a fraction of max, always within [0, 1]
    pub fn life_fraction(&self) -> f32 {
        (self.life.max(0) as f32 / self.max_life as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: i32,
    pub max_life: i32,
    /// Chase speed (pixels/sec)
    pub speed: f32,
    pub half_size: f32,
    /// Red hit flash
    pub tinted: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            life: tuning.enemy_max_life,
            max_life: tuning.enemy_max_life,
            speed: tuning.enemy_speed,
            half_size: tuning.enemy_half_size,
            tinted: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.half_size))
    }

    pub fn life_fraction(&self) -> f32 {
        (self.life.max(0) as f32 / self.max_life as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

/// Floating damage number shown where an enemy was hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamagePopup {
    pub id: u32,
    pub pos: Vec2,
    pub amount: i32,
}

/// A star from the level-up burst (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sparkle {
    pub pos: Vec2,
    /// 1.0 when spawned, fades to 0
    pub alpha: f32,
}

/// Something that happened during a tick, drained by the host each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Title screen dismissed
    GameStarted,
    EnemySpawned { id: u32, pos: Vec2 },
    /// An attack went off (whether or not it hit anything)
    PlayerAttacked { area: Rect },
    EnemyHit { id: u32, damage: i32, pos: Vec2 },
    EnemyKilled { id: u32, pos: Vec2 },
    PlayerDamaged { damage: i32, life: i32 },
    LevelUp { level: u32 },
    UpgradeApplied { choice: UpgradeChoice },
    GameOver { score: u64, elapsed_secs: u32 },
    /// Retry pressed; a fresh session is running
    SessionReset,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters for this run
    pub tuning: Tuning,
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Volume overlay is open (suspends the simulation)
    pub overlay_open: bool,
    /// Simulation clock; only advances while running
    pub clock_ms: u64,
    /// Whole seconds survived
    pub elapsed_secs: u32,
    pub score: u64,
    pub player: Player,
    pub progression: Progression,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub popups: Vec<DamagePopup>,
    pub sparkles: Vec<Sparkle>,
    /// Open upgrade menu (LevelUp phase only)
    pub upgrade_menu: Option<UpgradeMenu>,
    /// Level-ups earned but not yet offered
    pub queued_level_ups: u32,
    pub spawn_timer: RepeatingTimer,
    pub attack_timer: RepeatingTimer,
    /// One-second elapsed-time counter
    pub clock_timer: RepeatingTimer,
    pub schedule: Schedule,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            overlay_open: false,
            clock_ms: 0,
            elapsed_secs: 0,
            score: 0,
            player: Player::new(&tuning),
            progression: Progression::new(&tuning),
            enemies: Vec::new(),
            popups: Vec::new(),
            sparkles: Vec::new(),
            upgrade_menu: None,
            queued_level_ups: 0,
            spawn_timer: RepeatingTimer::new(tuning.spawn_interval_ms),
            attack_timer: RepeatingTimer::new(tuning.attack_cooldown_ms),
            clock_timer: RepeatingTimer::new(1000),
            schedule: Schedule::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True when physics, timers and delayed effects should advance
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing && !self.overlay_open
    }

    /// The playfield
    pub fn world_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.world_width, self.tuning.world_height)
    }

    /// Restore every session value to its initial state and start playing.
    ///
    /// Entity ids keep counting so effects scheduled for old enemies can
    /// never match a new one.
    pub fn reset_session(&mut self) {
        let generation = self.player.generation + 1;
        self.player = Player::new(&self.tuning);
        self.player.generation = generation;
        self.progression = Progression::new(&self.tuning);
        self.clock_ms = 0;
        self.elapsed_secs = 0;
        self.score = 0;
        self.enemies.clear();
        self.popups.clear();
        self.sparkles.clear();
        self.upgrade_menu = None;
        self.queued_level_ups = 0;
        self.spawn_timer = RepeatingTimer::new(self.tuning.spawn_interval_ms);
        self.attack_timer = RepeatingTimer::new(self.tuning.attack_cooldown_ms);
        self.clock_timer.reset();
        let dropped = self.schedule.len();
        self.schedule.clear();
        self.phase = GamePhase::Playing;
        log::info!(
            "Session reset (generation {}, {} pending effects dropped)",
            generation,
            dropped
        );
        self.events.push(GameEvent::SessionReset);
    }

    /// Scatter the level-up star burst across the screen
    pub fn spawn_sparkles(&mut self) {
        let (w, h) = (self.tuning.world_width, self.tuning.world_height);
        for _ in 0..SPARKLE_COUNT {
            let pos = Vec2::new(self.rng.random_range(0.0..=w), self.rng.random_range(0.0..=h));
            self.sparkles.push(Sparkle { pos, alpha: 1.0 });
        }
    }

    /// Fade sparkles; runs on wall time even while the simulation is paused
    pub fn update_sparkles(&mut self, dt_ms: u32) {
        let fade = dt_ms as f32 / SPARKLE_FADE_MS as f32;
        for sparkle in &mut self.sparkles {
            sparkle.alpha -= fade;
        }
        self.sparkles.retain(|s| s.alpha > 0.0);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Look up a live enemy
    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Open the upgrade menu for the next pending level-up, if any
    pub(crate) fn offer_next_upgrade(&mut self) -> bool {
        if self.queued_level_ups == 0 {
            return false;
        }
        self.queued_level_ups -= 1;
        self.upgrade_menu = Some(UpgradeMenu::new());
        self.phase = GamePhase::LevelUp;
        true
    }

    /// Apply a chosen upgrade and resume (or offer the next queued one)
    pub fn choose_upgrade(&mut self, choice: UpgradeChoice) {
        if self.phase != GamePhase::LevelUp {
            return;
        }
        choice.apply(&mut self.player, &self.tuning);
        log::info!("Upgrade chosen: {}", choice.label());
        self.events.push(GameEvent::UpgradeApplied { choice });
        self.upgrade_menu = None;
        if !self.offer_next_upgrade() {
            self.phase = GamePhase::Playing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_initial_values() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.player.life, 100);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.attack_damage, 30);
        assert_eq!(state.player.attack_range, 150.0);
        assert_eq!(state.player.speed, 100.0);
        assert_eq!(state.progression.level, 1);
        assert_eq!(state.progression.experience_to_next, 100);
        assert!(state.enemies.is_empty());
        assert!(!state.is_running());
    }

    #[test]
    fn test_is_running_respects_overlay_and_phase() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::Playing;
        assert!(state.is_running());
        state.overlay_open = true;
        assert!(!state.is_running());
        state.overlay_open = false;
        state.phase = GamePhase::LevelUp;
        assert!(!state.is_running());
    }

    #[test]
    fn test_reset_session() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::GameOver;
        state.score = 500;
        state.elapsed_secs = 77;
        state.player.life = 0;
        state.player.attack_damage = 60;
        let id = state.next_entity_id();
        let pos = Vec2::ZERO;
        let enemy = Enemy::new(id, pos, &state.tuning);
        state.enemies.push(enemy);

        state.reset_session();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_secs, 0);
        assert_eq!(state.player.life, 100);
        assert_eq!(state.player.attack_damage, 30);
        assert_eq!(state.player.generation, 1);
        assert!(state.enemies.is_empty());
        assert!(state.next_entity_id() > id);
        assert_eq!(state.drain_events(), vec![GameEvent::SessionReset]);
    }

    #[test]
    fn test_life_fraction_never_negative() {
        let mut player = Player::new(&Tuning::default());
        player.life = -20;
        assert_eq!(player.life_fraction(), 0.0);
        player.life = 50;
        assert_eq!(player.life_fraction(), 0.5);
    }

    #[test]
    fn test_sparkles_fade_out() {
        let mut state = GameState::new(3, Tuning::default());
        state.spawn_sparkles();
        assert_eq!(state.sparkles.len(), SPARKLE_COUNT);
        assert!(state.sparkles.iter().all(|s| s.pos.x >= 0.0 && s.pos.x <= 800.0));

        state.update_sparkles(500);
        assert_eq!(state.sparkles.len(), SPARKLE_COUNT);
        state.update_sparkles(500);
        assert!(state.sparkles.is_empty());
    }
}
