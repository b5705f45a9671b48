//! Experience, levels and upgrade choices

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::tuning::Tuning;

/// Experience/level tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    growth: f64,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: tuning.initial_experience_to_next,
            growth: tuning.experience_growth,
        }
    }

    /// Add experience; returns true if this crossed the threshold and levelled up.
    ///
    /// Leftover experience carries into the next level.
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.experience += amount;
        if self.experience >= self.experience_to_next {
            self.level_up();
            true
        } else {
            false
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.experience -= self.experience_to_next;
        self.experience_to_next = (self.experience_to_next as f64 * self.growth).floor() as u32;
    }
}

/// The three upgrades offered on level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeChoice {
    AttackDamage,
    AttackRange,
    MoveSpeed,
}

impl UpgradeChoice {
    /// Menu order
    pub const ALL: [UpgradeChoice; 3] = [
        UpgradeChoice::AttackDamage,
        UpgradeChoice::AttackRange,
        UpgradeChoice::MoveSpeed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UpgradeChoice::AttackDamage => "Increase Attack Damage",
            UpgradeChoice::AttackRange => "Increase Attack Range",
            UpgradeChoice::MoveSpeed => "Increase Move Speed",
        }
    }

    pub fn apply(&self, player: &mut Player, tuning: &Tuning) {
        match self {
            UpgradeChoice::AttackDamage => player.attack_damage += tuning.upgrade_attack_damage,
            UpgradeChoice::AttackRange => player.attack_range += tuning.upgrade_attack_range,
            UpgradeChoice::MoveSpeed => player.speed += tuning.upgrade_move_speed,
        }
    }
}

/// Keyboard cursor over the upgrade choices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeMenu {
    cursor: usize,
}

impl UpgradeMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        let n = UpgradeChoice::ALL.len();
        self.cursor = (self.cursor + n - 1) % n;
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % UpgradeChoice::ALL.len();
    }

    pub fn selected(&self) -> UpgradeChoice {
        UpgradeChoice::ALL[self.cursor]
    }
}
