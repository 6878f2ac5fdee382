//! Per-combatant status counters.
//!
//! ## Timing
//!
//! The tracker itself never decides *when* to tick or reset; the session
//! calls it at the right moments:
//!
//! - Vulnerable and weak tick down by one at the start of an enemy's own
//!   turn. Player stacks are never ticked.
//! - Player block is cleared at the start of the player's next turn, so it
//!   covers the enemy turn in between.
//! - Enemy block is cleared at the start of that enemy's own turn, so block
//!   an enemy gains covers the following player turn.

use serde::{Deserialize, Serialize};

use crate::core::{numeric, CombatantId, InvariantViolation};

/// A stat or debuff that can be reported in a status notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Vulnerable,
    Weak,
    Strength,
    Dexterity,
}

/// Numeric status counters for one combatant.
///
/// ```
/// use roguedeck::status::StatusTracker;
///
/// let mut status = StatusTracker::default();
/// status.add_block(5);
///
/// assert_eq!(status.spend_block(8), 5);
/// assert_eq!(status.block, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTracker {
    /// Damage absorption, consumed before hp. Never negative.
    pub block: i64,
    /// Added to outgoing attack damage. May be negative.
    pub strength: i64,
    /// Added to block gained from cards. May be negative.
    pub dexterity: i64,
    /// Incoming damage x1.5 while > 0.
    pub vulnerable: i64,
    /// Outgoing enemy attack damage x0.75 while > 0.
    pub weak: i64,
}

impl StatusTracker {
    /// Add vulnerable stacks. Returns the new total.
    pub fn apply_vulnerable(&mut self, stacks: i64) -> i64 {
        self.vulnerable = self.vulnerable.saturating_add(stacks).max(0);
        self.vulnerable
    }

    /// Add weak stacks. Returns the new total.
    pub fn apply_weak(&mut self, stacks: i64) -> i64 {
        self.weak = self.weak.saturating_add(stacks).max(0);
        self.weak
    }

    /// Add strength. Returns the new total.
    pub fn add_strength(&mut self, amount: i64) -> i64 {
        self.strength = numeric::add(self.strength, amount, "strength");
        self.strength
    }

    /// Add dexterity. Returns the new total.
    pub fn add_dexterity(&mut self, amount: i64) -> i64 {
        self.dexterity = numeric::add(self.dexterity, amount, "dexterity");
        self.dexterity
    }

    /// Add block. Negative amounts add nothing. Returns the amount gained.
    pub fn add_block(&mut self, amount: i64) -> i64 {
        let before = self.block;
        self.block = self.block.saturating_add(amount.max(0));
        self.block - before
    }

    /// Absorb up to `amount` damage with block. Returns the amount blocked.
    pub fn spend_block(&mut self, amount: i64) -> i64 {
        let blocked = self.block.min(amount.max(0));
        self.block -= blocked;
        blocked
    }

    /// Clear block. Returns the amount cleared.
    pub fn reset_block(&mut self) -> i64 {
        std::mem::take(&mut self.block)
    }

    /// Decrement vulnerable and weak by one, floored at zero.
    pub fn tick_down_on_turn_start(&mut self) {
        self.vulnerable = (self.vulnerable - 1).max(0);
        self.weak = (self.weak - 1).max(0);
    }

    #[must_use]
    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable > 0
    }

    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak > 0
    }

    /// Current value of one status.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> i64 {
        match kind {
            StatusKind::Vulnerable => self.vulnerable,
            StatusKind::Weak => self.weak,
            StatusKind::Strength => self.strength,
            StatusKind::Dexterity => self.dexterity,
        }
    }

    /// Check the never-negative counters.
    pub fn verify(&self, owner: CombatantId) -> Result<(), InvariantViolation> {
        for (field, value) in [("block", self.block), ("vulnerable", self.vulnerable), ("weak", self.weak)] {
            if value < 0 {
                return Err(InvariantViolation::NegativeCounter {
                    combatant: owner,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Reset any negative never-negative counter to zero.
    pub fn repair(&mut self) {
        self.block = self.block.max(0);
        self.vulnerable = self.vulnerable.max(0);
        self.weak = self.weak.max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacks_never_negative() {
        let mut status = StatusTracker::default();
        assert_eq!(status.apply_vulnerable(2), 2);
        assert_eq!(status.apply_vulnerable(-5), 0);
        assert_eq!(status.apply_weak(-1), 0);
    }

    #[test]
    fn test_tick_down_floors_at_zero() {
        let mut status = StatusTracker::default();
        status.apply_vulnerable(2);
        status.apply_weak(1);

        status.tick_down_on_turn_start();
        assert_eq!((status.vulnerable, status.weak), (1, 0));

        status.tick_down_on_turn_start();
        status.tick_down_on_turn_start();
        assert_eq!((status.vulnerable, status.weak), (0, 0));
    }

    #[test]
    fn test_tick_leaves_block_and_strength() {
        let mut status = StatusTracker::default();
        status.add_block(4);
        status.add_strength(2);
        status.tick_down_on_turn_start();
        assert_eq!(status.block, 4);
        assert_eq!(status.strength, 2);
    }

    #[test]
    fn test_spend_block() {
        let mut status = StatusTracker::default();
        status.add_block(5);

        assert_eq!(status.spend_block(3), 3);
        assert_eq!(status.block, 2);
        assert_eq!(status.spend_block(10), 2);
        assert_eq!(status.block, 0);
        assert_eq!(status.spend_block(-4), 0);
    }

    #[test]
    fn test_negative_block_gain_ignored() {
        let mut status = StatusTracker::default();
        assert_eq!(status.add_block(-3), 0);
        assert_eq!(status.block, 0);
    }

    #[test]
    fn test_block_and_stacks_saturate() {
        let mut status = StatusTracker::default();
        status.add_block(10);
        assert_eq!(status.add_block(i64::MAX), i64::MAX - 10);
        assert_eq!(status.block, i64::MAX);

        status.apply_vulnerable(3);
        assert_eq!(status.apply_vulnerable(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_strength_can_go_negative() {
        let mut status = StatusTracker::default();
        assert_eq!(status.add_strength(-2), -2);
        assert_eq!(status.get(StatusKind::Strength), -2);
    }

    #[test]
    fn test_reset_block() {
        let mut status = StatusTracker::default();
        status.add_block(7);
        assert_eq!(status.reset_block(), 7);
        assert_eq!(status.block, 0);
    }

    #[test]
    fn test_verify_and_repair() {
        let mut status = StatusTracker { block: -1, ..StatusTracker::default() };
        assert!(status.verify(CombatantId::Player).is_err());
        status.repair();
        assert!(status.verify(CombatantId::Player).is_ok());
    }
}
