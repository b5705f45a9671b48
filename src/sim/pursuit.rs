//! Enemy chase behaviour: head straight for the player every tick.

use glam::Vec2;

use super::state::{Enemy, GameState};
use crate::{bearing, heading};

/// Point an enemy's velocity at `target`
#[inline]
pub fn chase(enemy: &mut Enemy, target: Vec2) {
    enemy.vel = heading(bearing(enemy.pos, target)) * enemy.speed;
}

/// Recompute every enemy's velocity toward the player and integrate
pub fn update_pursuit(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        chase(enemy, target);
        enemy.pos += enemy.vel * dt;
    }
}
