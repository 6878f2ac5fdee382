//! Serializable combat state.
//!
//! A `CombatSnapshot` holds everything needed to resume a combat exactly:
//! piles, combatants, enemy intent cursors, corruption, the turn counter,
//! the instance ledger and the RNG position. Pending notifications and
//! subscribers are not part of it.
//!
//! Two encodings are provided: JSON for inspection and external save
//! systems, and bincode for compact in-memory checkpoints.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::combat::CombatStatus;
use super::ledger::CardLedger;
use crate::core::{ActionRecord, GameRngState, IdAllocator, InvariantViolation, SnapshotError};
use crate::enemies::Enemy;
use crate::piles::PileStore;
use crate::status::{CorruptionMeter, PlayerState};

/// Full combat state at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub status: CombatStatus,
    pub turn: u32,
    pub action_sequence: u32,
    pub piles: PileStore,
    pub player: PlayerState,
    pub enemies: Vec<Enemy>,
    pub corruption: CorruptionMeter,
    pub ids: IdAllocator,
    pub ledger: CardLedger,
    pub rng: GameRngState,
    pub history: Vector<ActionRecord>,
}

impl CombatSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the bookkeeping invariants a live session maintains.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.status == CombatStatus::NotStarted {
            return Ok(());
        }
        self.piles.verify(self.ledger.expected())?;
        if let Some(card) = self.piles.cards().find(|c| !self.ids.has_issued_instance(c.instance_id)) {
            return Err(InvariantViolation::UnissuedId(card.instance_id.to_string()));
        }
        if let Some(enemy) = self.enemies.iter().find(|e| !self.ids.has_issued_enemy(e.id)) {
            return Err(InvariantViolation::UnissuedId(enemy.id.to_string()));
        }
        self.player.combatant.verify()?;
        self.corruption.verify()?;
        self.enemies.iter().try_for_each(Enemy::verify)
    }
}
