//! Player commands and their history.
//!
//! The player can do exactly two things during a combat: play a card from
//! hand (optionally at a target) or end the turn. Accepted commands are
//! recorded with the turn and in-turn sequence number so a combat can be
//! replayed or inspected after the fact.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;

/// A player command.
///
/// ```
/// use roguedeck::core::CombatAction;
///
/// let play = CombatAction::play(0, Some(1));
/// assert!(!play.is_end_turn());
/// assert!(CombatAction::EndTurn.is_end_turn());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    /// Play the card at `hand_index`, aimed at the enemy at `target`
    /// (an index into the active enemy list).
    PlayCard {
        hand_index: usize,
        target: Option<usize>,
    },
    /// Discard the hand and let the enemies act.
    EndTurn,
}

impl CombatAction {
    /// Create a play-card command.
    #[must_use]
    pub const fn play(hand_index: usize, target: Option<usize>) -> Self {
        Self::PlayCard { hand_index, target }
    }

    /// Check if this is an end-turn command.
    #[must_use]
    pub const fn is_end_turn(&self) -> bool {
        matches!(self, Self::EndTurn)
    }
}

/// An accepted command with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The command taken.
    pub action: CombatAction,

    /// The card instance that was played, if any.
    pub card: Option<InstanceId>,

    /// Turn number when the command was accepted.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: CombatAction, card: Option<InstanceId>, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            card,
            turn,
            sequence,
        }
    }
}
