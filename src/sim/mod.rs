//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering, audio or
//! platform dependencies:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Entities iterate in spawn order

pub mod combat;
pub mod progression;
pub mod pursuit;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use combat::{AttackReport, damage_player, grant_experience, player_attack, resolve_contacts, roll_damage};
pub use progression::{Progression, UpgradeChoice, UpgradeMenu};
pub use pursuit::{chase, update_pursuit};
pub use rect::Rect;
pub use spawn::{spawn_count, spawn_enemies, spawn_position};
pub use state::{DamagePopup, Enemy, GameEvent, GamePhase, GameState, Player, Sparkle};
pub use tick::{TickInput, autopilot, tick};
pub use timer::{Effect, Owner, RepeatingTimer, Schedule, ScheduledEffect};
