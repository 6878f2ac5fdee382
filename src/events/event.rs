//! Combat notifications.
//!
//! Every observable change inside a combat is reported as a `CombatEvent`.
//! Payloads carry identifiers and numbers only, never references into
//! session state, so a presentation layer can buffer or forward them freely.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{CombatantId, EnemyId, InstanceId};
use crate::status::StatusKind;

/// Something that happened during a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A player turn began. The first turn is 1.
    TurnStarted { turn: u32, energy: i64 },

    /// A card moved from the draw pile to the hand.
    CardDrawn { instance: InstanceId },

    /// The discard pile was shuffled under the draw pile.
    PileReshuffled { cards: usize },

    /// A card was accepted for play and paid for.
    CardPlayed {
        instance: InstanceId,
        card: CardId,
        target: Option<EnemyId>,
        cost: i64,
    },

    /// A played card went to the exhaust pile.
    CardExhausted { instance: InstanceId },

    /// An enemy took damage. `hp` is the value after the hit.
    EnemyDamaged {
        enemy: EnemyId,
        blocked: i64,
        hp_lost: i64,
        hp: i64,
    },

    /// An enemy reached 0 hp and left the fight.
    EnemyDefeated { enemy: EnemyId },

    /// The player lost hp or block. `hp` is the value after the hit.
    PlayerDamaged { blocked: i64, hp_lost: i64, hp: i64 },

    BlockGained {
        combatant: CombatantId,
        amount: i64,
        total: i64,
    },

    /// A status stat changed by `amount`; `total` is the new value.
    StatusApplied {
        combatant: CombatantId,
        status: StatusKind,
        amount: i64,
        total: i64,
    },

    Healed {
        combatant: CombatantId,
        amount: i64,
        hp: i64,
    },

    /// A phased enemy moved to another phase of its table.
    PhaseChanged {
        enemy: EnemyId,
        from: usize,
        to: usize,
    },

    CorruptionChanged { before: i64, after: i64 },

    /// Corruption crossed a configured level upward.
    CorruptionThreshold { threshold: i64, value: i64 },

    CombatVictory { turn: u32 },

    CombatDefeat { turn: u32 },
}

impl CombatEvent {
    /// Short stable name, handy for logs and filtering.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CombatEvent::TurnStarted { .. } => "turn-started",
            CombatEvent::CardDrawn { .. } => "card-drawn",
            CombatEvent::PileReshuffled { .. } => "pile-reshuffled",
            CombatEvent::CardPlayed { .. } => "card-played",
            CombatEvent::CardExhausted { .. } => "card-exhausted",
            CombatEvent::EnemyDamaged { .. } => "enemy-damaged",
            CombatEvent::EnemyDefeated { .. } => "enemy-defeated",
            CombatEvent::PlayerDamaged { .. } => "player-damaged",
            CombatEvent::BlockGained { .. } => "block-gained",
            CombatEvent::StatusApplied { .. } => "status-applied",
            CombatEvent::Healed { .. } => "healed",
            CombatEvent::PhaseChanged { .. } => "phase-changed",
            CombatEvent::CorruptionChanged { .. } => "corruption-changed",
            CombatEvent::CorruptionThreshold { .. } => "corruption-threshold",
            CombatEvent::CombatVictory { .. } => "combat-victory",
            CombatEvent::CombatDefeat { .. } => "combat-defeat",
        }
    }

    /// Does this event end the combat?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatEvent::CombatVictory { .. } | CombatEvent::CombatDefeat { .. })
    }
}
