//! Player attacks and contact damage
//!
//! The attack resolver runs once per attack-timer tick: every enemy whose
//! bounds overlap the square attack area takes jittered damage. Contact
//! damage runs every tick the player's body touches an enemy.

use glam::Vec2;
use rand::Rng;

use super::state::{DamagePopup, GameEvent, GamePhase, GameState};
use super::timer::{Effect, Owner};
use crate::tuning::Tuning;
use crate::{bearing, heading};

/// Roll `floor(base * U(min, max))`
pub fn roll_damage<R: Rng>(rng: &mut R, base: i32, tuning: &Tuning) -> i32 {
    let multiplier = rng.random_range(tuning.damage_jitter_min..=tuning.damage_jitter_max);
    (base as f64 * multiplier).floor() as i32
}

/// Result of one attack tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackReport {
    /// Enemies damaged
    pub hits: u32,
    /// Enemies destroyed
    pub kills: u32,
}

/// Resolve one attack. Returns `None` if an attack is still in progress.
pub fn player_attack(state: &mut GameState) -> Option<AttackReport> {
    if state.player.attacking {
        log::trace!("Attack skipped: previous attack still active");
        return None;
    }

    let now = state.clock_ms;
    let area = state.player.attack_area();
    state.player.attacking = true;
    state.schedule.schedule(
        now,
        state.tuning.attack_visual_ms,
        Owner::Player {
            generation: state.player.generation,
        },
        Effect::EndAttackVisual,
    );
    state.events.push(GameEvent::PlayerAttacked { area });

    let targets: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| area.intersects(&e.bounds()))
        .map(|(i, _)| i)
        .collect();

    let mut report = AttackReport::default();
    let mut killed = Vec::new();

    for index in targets {
        let damage = roll_damage(&mut state.rng, state.player.attack_damage, &state.tuning);
        let enemy = &mut state.enemies[index];
        enemy.life -= damage;
        enemy.tinted = true;
        let (id, pos, dead) = (enemy.id, enemy.pos, enemy.is_dead());

        state.schedule.schedule(
            now,
            state.tuning.enemy_hit_tint_ms,
            Owner::Enemy { id },
            Effect::ClearEnemyTint,
        );

        let popup_id = state.next_entity_id();
        state.popups.push(DamagePopup {
            id: popup_id,
            pos,
            amount: damage,
        });
        state.schedule.schedule(
            now,
            state.tuning.damage_popup_ms,
            Owner::Popup { id: popup_id },
            Effect::ExpirePopup,
        );

        state.events.push(GameEvent::EnemyHit { id, damage, pos });
        report.hits += 1;
        if dead {
            killed.push((id, pos));
        }
    }

    // Removal happens after iteration so nothing observes a dead enemy
    state.enemies.retain(|e| !e.is_dead());

    let experience = state.tuning.kill_experience;
    for (id, pos) in killed {
        state.score += state.tuning.kill_score;
        state.events.push(GameEvent::EnemyKilled { id, pos });
        log::debug!("Enemy {} destroyed (score {})", id, state.score);
        report.kills += 1;
        grant_experience(state, experience);
    }

    log::trace!("Attack: {} hits, {} kills", report.hits, report.kills);
    Some(report)
}

/// Add experience, pausing for an upgrade choice on level-up
pub fn grant_experience(state: &mut GameState, amount: u32) {
    if !state.progression.add_experience(amount) {
        return;
    }

    let level = state.progression.level;
    log::info!(
        "Level up! Now level {} ({} / {} exp)",
        level,
        state.progression.experience,
        state.progression.experience_to_next
    );
    state.events.push(GameEvent::LevelUp { level });
    state.spawn_sparkles();
    state.queued_level_ups += 1;
    if state.phase == GamePhase::Playing {
        state.offer_next_upgrade();
    }
}

/// Damage the player from the first enemy touching their body, if any
pub fn resolve_contacts(state: &mut GameState) -> bool {
    if state.player.invincible {
        return false;
    }
    let body = state.player.bounds();
    let source = state
        .enemies
        .iter()
        .find(|e| body.intersects(&e.bounds()))
        .map(|e| e.pos);

    match source {
        Some(pos) => damage_player(state, pos),
        None => false,
    }
}

/// Apply contact damage from an enemy at `source`.
///
/// Returns false if the hit was ignored (invincible or already game over).
pub fn damage_player(state: &mut GameState, source: Vec2) -> bool {
    if state.player.invincible || state.phase == GamePhase::GameOver {
        return false;
    }

    let damage = state.tuning.contact_damage;
    let player = &mut state.player;
    player.life = (player.life - damage).max(0);

    // Knock the player away from the enemy, staying inside the world
    let away = heading(bearing(source, player.pos));
    let knocked = player.pos + away * state.tuning.knockback_distance;
    let world = state.world_bounds();
    state.player.pos = world.clamp_center(knocked, Vec2::splat(state.player.half_size));

    state.player.invincible = true;
    state.player.tinted = true;
    state.schedule.schedule(
        state.clock_ms,
        state.tuning.invincibility_ms,
        Owner::Player {
            generation: state.player.generation,
        },
        Effect::EndInvincibility,
    );

    let life = state.player.life;
    state.events.push(GameEvent::PlayerDamaged { damage, life });

    if state.player.is_dead() {
        enter_game_over(state);
    }
    true
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.upgrade_menu = None;
    state.queued_level_ups = 0;
    log::info!(
        "Game over: score {} after {}s",
        state.score,
        state.elapsed_secs
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        elapsed_secs: state.elapsed_secs,
    });
}
