//! Identifiers for things that exist inside a combat.
//!
//! ## ID Layout
//!
//! - `InstanceId`: one physical card copy. Allocated by the session when a
//!   deck is loaded or when an effect introduces a card mid-combat.
//! - `EnemyId`: one enemy slot. Stable for the whole encounter, even after
//!   other enemies are defeated and removed from the active list.
//! - `CombatantId`: either the player or an enemy, used in notifications.
//!
//! ```
//! use roguedeck::core::{CombatantId, EnemyId, InstanceId};
//!
//! let card = InstanceId(7);
//! assert_eq!(card.raw(), 7);
//!
//! let target = CombatantId::Enemy(EnemyId(2));
//! assert!(!target.is_player());
//! assert_eq!(target.as_enemy(), Some(EnemyId(2)));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card copy in a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Identifier for an enemy within one combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl EnemyId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enemy#{}", self.0)
    }
}

/// Either side of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    Player,
    Enemy(EnemyId),
}

impl CombatantId {
    /// Check if this refers to the player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, CombatantId::Player)
    }

    /// Convert to an enemy ID if this refers to an enemy.
    #[must_use]
    pub const fn as_enemy(self) -> Option<EnemyId> {
        match self {
            CombatantId::Enemy(id) => Some(id),
            CombatantId::Player => None,
        }
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatantId::Player => write!(f, "Player"),
            CombatantId::Enemy(id) => write!(f, "{}", id),
        }
    }
}

/// Monotonic allocator for IDs within one session.
///
/// Each session owns its own allocator, so two sessions never share
/// counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_instance: u32,
    next_enemy: u32,
}

impl IdAllocator {
    /// Create a fresh allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new card instance ID.
    pub fn instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Allocate a new enemy ID.
    pub fn enemy(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy);
        self.next_enemy += 1;
        id
    }

    /// Was this instance ID handed out already?
    #[must_use]
    pub fn has_issued_instance(&self, id: InstanceId) -> bool {
        id.0 < self.next_instance
    }

    /// Was this enemy ID handed out already?
    #[must_use]
    pub fn has_issued_enemy(&self, id: EnemyId) -> bool {
        id.0 < self.next_enemy
    }
}
