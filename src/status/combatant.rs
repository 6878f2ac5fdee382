//! Combatant records: hp, status counters and (for the player) energy.

use serde::{Deserialize, Serialize};

use super::tracker::StatusTracker;
use crate::core::{CombatantId, InvariantViolation};

/// Outcome of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage absorbed by block.
    pub blocked: i64,
    /// Hp actually lost.
    pub hp_lost: i64,
}

/// Hp and status for either side of a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub current_hp: i64,
    pub max_hp: i64,
    pub status: StatusTracker,
}

impl Combatant {
    /// Create a combatant at full hp.
    #[must_use]
    pub fn new(id: CombatantId, max_hp: i64) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            id,
            current_hp: max_hp,
            max_hp,
            status: StatusTracker::default(),
        }
    }

    /// Create a combatant at a given hp, clamped to `0..=max_hp`.
    #[must_use]
    pub fn with_hp(id: CombatantId, current_hp: i64, max_hp: i64) -> Self {
        let mut combatant = Self::new(id, max_hp);
        combatant.current_hp = current_hp.clamp(0, combatant.max_hp);
        combatant
    }

    /// Apply damage: block first, then hp (floored at 0).
    pub fn take_damage(&mut self, amount: i64) -> DamageReport {
        let amount = amount.max(0);
        let blocked = self.status.spend_block(amount);
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_sub(amount - blocked).max(0);
        DamageReport {
            blocked,
            hp_lost: before - self.current_hp,
        }
    }

    /// Restore hp up to max. Returns the hp gained.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.current_hp - before
    }

    /// Lose hp ignoring block, never dropping below 1. Returns the hp lost.
    pub fn lose_hp_nonlethal(&mut self, amount: i64) -> i64 {
        let before = self.current_hp;
        let floor = before.min(1);
        self.current_hp = self.current_hp.saturating_sub(amount.max(0)).max(floor);
        before - self.current_hp
    }

    /// Is hp at or below `percent` of max? Computed exactly, without rounding.
    #[must_use]
    pub fn hp_at_or_below_percent(&self, percent: i64) -> bool {
        i128::from(self.current_hp) * 100 <= i128::from(percent) * i128::from(self.max_hp)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// Check hp bounds and status counters.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if self.current_hp < 0 || self.current_hp > self.max_hp {
            return Err(InvariantViolation::HpOutOfRange {
                combatant: self.id,
                hp: self.current_hp,
                max_hp: self.max_hp,
            });
        }
        self.status.verify(self.id)
    }

    /// Clamp hp and reset negative counters.
    pub fn repair(&mut self) {
        self.max_hp = self.max_hp.max(0);
        self.current_hp = self.current_hp.clamp(0, self.max_hp);
        self.status.repair();
    }
}

/// Run-level player stats handed into a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub current_hp: i64,
    pub max_hp: i64,
    /// Run corruption, clamped to `0..=100` on entry.
    pub corruption: i64,
}

impl PlayerProfile {
    /// A player at full hp with no corruption.
    #[must_use]
    pub fn new(max_hp: i64) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            corruption: 0,
        }
    }

    /// Set starting corruption (builder pattern).
    #[must_use]
    pub fn with_corruption(mut self, corruption: i64) -> Self {
        self.corruption = corruption;
        self
    }

    /// Set starting hp (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, current_hp: i64) -> Self {
        self.current_hp = current_hp;
        self
    }
}

/// The player during combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub combatant: Combatant,
    /// Energy left this turn. May exceed `max_energy` after energy effects.
    pub energy: i64,
    pub max_energy: i64,
}

impl PlayerState {
    /// Create the player at the start of a combat, with a full energy pool.
    #[must_use]
    pub fn new(profile: &PlayerProfile, max_energy: i64) -> Self {
        Self {
            combatant: Combatant::with_hp(CombatantId::Player, profile.current_hp, profile.max_hp),
            energy: max_energy,
            max_energy,
        }
    }

    /// Pay an energy cost. Returns false and changes nothing if unaffordable.
    pub fn spend_energy(&mut self, cost: i64) -> bool {
        let cost = cost.max(0);
        if cost > self.energy {
            return false;
        }
        self.energy -= cost;
        true
    }

    /// Gain energy without clamping to the maximum.
    pub fn gain_energy(&mut self, amount: i64) {
        self.energy = self.energy.saturating_add(amount).max(0);
    }

    /// Refill energy to the per-turn maximum.
    pub fn refill_energy(&mut self) {
        self.energy = self.max_energy;
    }

    pub fn status(&self) -> &StatusTracker {
        &self.combatant.status
    }
}
