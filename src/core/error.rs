//! Error types.
//!
//! Every rejected operation returns one of these instead of panicking, and
//! leaves the state it was called on untouched:
//!
//! - [`CombatError`]: public session operations (play, end turn, restore)
//! - [`PileError`]: pile bookkeeping
//! - [`ContentError`]: card/enemy/config ingestion
//! - [`SnapshotError`]: snapshot encoding and validation
//! - [`InvariantViolation`]: a broken bookkeeping invariant

use super::entity::{CombatantId, EnemyId, InstanceId};

/// Errors surfaced by the public combat surface.
#[derive(Debug, thiserror::Error)]
pub enum CombatError {
    #[error("no combat is in progress")]
    NotStarted,

    #[error("a combat is already in progress")]
    AlreadyStarted,

    #[error("combat is over; no further actions are accepted")]
    CombatOver,

    #[error("an encounter needs at least one enemy")]
    EmptyEncounter,

    #[error("hand index {index} out of range (hand has {hand_size} cards)")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("{0} cannot be played")]
    Unplayable(InstanceId),

    #[error("card costs {cost} energy but only {available} is available")]
    InsufficientEnergy { cost: i64, available: i64 },

    #[error("card needs a target and {enemies} enemies are alive")]
    TargetRequired { enemies: usize },

    #[error("target index {index} out of range ({enemies} enemies alive)")]
    InvalidTarget { index: usize, enemies: usize },

    #[error("pile operation failed: {0}")]
    Pile(#[from] PileError),

    #[error("snapshot rejected: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid content: {0}")]
    Content(#[from] ContentError),
}

/// Errors from pile bookkeeping. A failed call never mutates any pile.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    #[error("piles were already initialized for this combat")]
    AlreadyStarted,

    #[error("{0} is not in the hand")]
    NotInHand(InstanceId),

    #[error("{0} is not in any pile")]
    NotFound(InstanceId),

    #[error("{0} is already tracked")]
    DuplicateInstance(InstanceId),

    #[error("hand is full ({max_hand_size} cards)")]
    HandFull { max_hand_size: usize },
}

/// Errors raised while ingesting content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate content id '{0}'")]
    DuplicateId(String),

    #[error("unknown card '{0}'")]
    UnknownCard(String),

    #[error("unknown enemy '{0}'")]
    UnknownEnemy(String),

    #[error("enemy '{enemy}' must have a positive hp (got {hp})")]
    InvalidHp { enemy: String, hp: i64 },

    #[error("enemy '{enemy}' declares neither intents nor phases")]
    NoIntents { enemy: String },

    #[error("enemy '{enemy}' declares both intents and phases")]
    ConflictingIntentSources { enemy: String },

    #[error("phase '{phase}' of enemy '{enemy}' has no intents")]
    EmptyPhase { enemy: String, phase: String },

    #[error("phase '{phase}' of enemy '{enemy}' has threshold {threshold} outside 0..=100")]
    InvalidThreshold { enemy: String, phase: String, threshold: i64 },

    #[error("phase '{phase}' of enemy '{enemy}' has an on-enter effect of type '{kind}' (only buff or heal)")]
    InvalidOnEnter { enemy: String, phase: String, kind: String },

    #[error("unknown intent type '{0}'")]
    UnknownIntentType(String),

    #[error("intent '{kind}' is missing field '{field}'")]
    MissingIntentField { kind: String, field: &'static str },

    #[error("intent '{kind}' has {hits} hits (at most 99)")]
    TooManyHits { kind: String, hits: i64 },

    #[error("intent '{kind}' has unknown effect '{effect}'")]
    UnknownIntentEffect { kind: String, effect: String },
}

/// Errors raised while encoding, decoding or validating snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot binary: {0}")]
    Binary(#[from] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(#[from] InvariantViolation),
}

/// A broken bookkeeping invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("pile total is {actual} but the ledger expects {expected}")]
    PileCountMismatch { expected: usize, actual: usize },

    #[error("{0} appears in more than one pile slot")]
    DuplicateInstance(InstanceId),

    #[error("{combatant} has negative {field} ({value})")]
    NegativeCounter { combatant: CombatantId, field: &'static str, value: i64 },

    #[error("{combatant} hp {hp} outside 0..={max_hp}")]
    HpOutOfRange { combatant: CombatantId, hp: i64, max_hp: i64 },

    #[error("corruption {0} outside 0..=100")]
    CorruptionOutOfRange(i64),

    #[error("{enemy} has a phase or intent cursor outside its tables")]
    CursorOutOfRange { enemy: EnemyId },

    #[error("id allocator has not issued {0} yet")]
    UnissuedId(String),
}
