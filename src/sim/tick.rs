//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation. Within a running tick the
//! order is: player input, enemy pursuit, contact damage, timers
//! (elapsed clock, spawner, attack), then due delayed effects.

use glam::Vec2;

use super::combat::{player_attack, resolve_contacts};
use super::progression::UpgradeChoice;
use super::pursuit::update_pursuit;
use super::spawn::spawn_enemies;
use super::state::{GameEvent, GamePhase, GameState};
use super::timer::{Effect, Owner};
use crate::ms_to_secs;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Any key on the title screen
    pub start: bool,
    /// Retry key on the game over screen
    pub retry: bool,
    /// Upgrade menu navigation
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_confirm: bool,
    /// Direct pick (pointer click on a menu entry)
    pub upgrade: Option<UpgradeChoice>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    // Visual-only; keeps fading while an upgrade menu is open
    state.update_sparkles(dt_ms);

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    // Phase transitions wait until the overlay is dismissed
    match state.phase {
        GamePhase::Title => {
            if input.start && !state.overlay_open {
                state.phase = GamePhase::Playing;
                log::info!("Game started (seed {})", state.seed);
                state.events.push(GameEvent::GameStarted);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.retry && !state.overlay_open {
                state.reset_session();
            }
            return;
        }
        GamePhase::LevelUp => {
            if !state.overlay_open {
                handle_upgrade_menu(state, &input);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Don't tick while the volume overlay is open
    if !state.is_running() {
        return;
    }

    state.clock_ms += dt_ms as u64;
    let dt = ms_to_secs(dt_ms);

    move_player(state, &input, dt);
    update_pursuit(state, dt);

    resolve_contacts(state);
    if !state.is_running() {
        return;
    }

    let seconds = state.clock_timer.advance(dt_ms);
    state.elapsed_secs += seconds;

    for _ in 0..state.spawn_timer.advance(dt_ms) {
        spawn_enemies(state);
    }

    for _ in 0..state.attack_timer.advance(dt_ms) {
        player_attack(state);
        if !state.is_running() {
            break;
        }
    }

    apply_due_effects(state);
}

/// Directional keys set velocity components; bodies stay inside the world
fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let speed = state.player.speed;
    let vx = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };
    let vy = if input.up {
        -speed
    } else if input.down {
        speed
    } else {
        0.0
    };

    state.player.vel = Vec2::new(vx, vy);
    let next = state.player.pos + state.player.vel * dt;
    let half = Vec2::splat(state.player.half_size);
    state.player.pos = state.world_bounds().clamp_center(next, half);
}

fn handle_upgrade_menu(state: &mut GameState, input: &TickInput) {
    if let Some(choice) = input.upgrade {
        state.choose_upgrade(choice);
        return;
    }

    let Some(menu) = state.upgrade_menu.as_mut() else {
        return;
    };
    if input.menu_up {
        menu.move_up();
    }
    if input.menu_down {
        menu.move_down();
    }
    if input.menu_confirm {
        let choice = menu.selected();
        state.choose_upgrade(choice);
    }
}

/// Run delayed effects whose time has come.
///
/// Effects whose owner no longer exists (dead enemy, expired popup, player
/// from a previous session) are dropped.
fn apply_due_effects(state: &mut GameState) {
    for due in state.schedule.take_due(state.clock_ms) {
        match (due.owner, due.effect) {
            (Owner::Player { generation }, Effect::EndInvincibility | Effect::EndAttackVisual)
                if generation != state.player.generation =>
            {
                log::trace!("Dropped {:?} from player generation {}", due.effect, generation);
            }
            (Owner::Player { .. }, Effect::EndInvincibility) => {
                state.player.invincible = false;
                state.player.tinted = false;
            }
            (Owner::Player { .. }, Effect::EndAttackVisual) => state.player.attacking = false,
            (Owner::Enemy { id }, Effect::ClearEnemyTint) => match state.enemy_mut(id) {
                Some(enemy) => enemy.tinted = false,
                None => log::trace!("Dropped tint clear for dead enemy {}", id),
            },
            (Owner::Popup { id }, Effect::ExpirePopup) => {
                state.popups.retain(|p| p.id != id);
            }
            (owner, effect) => {
                log::warn!("Effect {:?} does not apply to {:?}", effect, owner);
            }
        }
    }
}

/// Generate input for idle/demo mode: flee the closest enemy, drift back to
/// the middle otherwise, and cycle through upgrades.
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = TickInput {
        idle_mode: true,
        retry: input.retry,
        ..Default::default()
    };

    match state.phase {
        GamePhase::Title => out.start = true,
        GamePhase::LevelUp => {
            let index = state.progression.level as usize % UpgradeChoice::ALL.len();
            out.upgrade = Some(UpgradeChoice::ALL[index]);
        }
        GamePhase::GameOver => {}
        GamePhase::Playing => {
            let pos = state.player.pos;
            let threat = state
                .enemies
                .iter()
                .map(|e| (e.pos, e.pos.distance_squared(pos)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            let flee_radius = state.player.attack_range;
            let center = state.world_bounds().center();
            let wish = match threat {
                Some((enemy_pos, dist_sq)) if dist_sq < flee_radius * flee_radius => pos - enemy_pos,
                _ => center - pos,
            };

            let deadzone = 4.0;
            out.left = wish.x < -deadzone;
            out.right = wish.x > deadzone;
            out.up = wish.y < -deadzone;
            out.down = wish.y > deadzone;
        }
    }
    out
}
