//! Repeating timers and owner-tokened delayed effects
//!
//! Timers only advance while the simulation runs, so pausing is a matter of
//! not calling [`RepeatingTimer::advance`] / not moving the clock forward.

use serde::{Deserialize, Serialize};

/// A fixed-interval timer that reports how many times it fired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatingTimer {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl RepeatingTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms`, returning the number of completed intervals
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.elapsed_ms += dt_ms;
        let fires = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        fires
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

/// Who a delayed effect belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// The player incarnation with this generation
    Player { generation: u32 },
    /// A live enemy (ids are never reused)
    Enemy { id: u32 },
    /// A floating damage number
    Popup { id: u32 },
}

/// Effects that are applied after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// End of the invincibility window; also clears the red tint
    EndInvincibility,
    /// Attack outline disappears and the attacking flag clears
    EndAttackVisual,
    /// Enemy hit flash ends
    ClearEnemyTint,
    /// Damage number is removed
    ExpirePopup,
}

/// A delayed effect waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    pub due_ms: u64,
    pub owner: Owner,
    pub effect: Effect,
}

/// Pending delayed effects in scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<ScheduledEffect>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32, owner: Owner, effect: Effect) {
        self.pending.push(ScheduledEffect {
            due_ms: now_ms + delay_ms as u64,
            owner,
            effect,
        });
    }

    /// Remove and return every effect due at or before `now_ms`,
    /// ordered by due time (ties keep scheduling order)
    pub fn take_due(&mut self, now_ms: u64) -> Vec<ScheduledEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|e| e.due_ms <= now_ms);
        self.pending = pending;
        due.sort_by_key(|e| e.due_ms);
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
