//! Core types: identifiers, RNG, configuration, errors, numeric guards and
//! command history.
//!
//! Nothing in here knows about cards, enemies or turns; the other modules
//! build on these pieces.

pub mod entity;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod numeric;

pub use entity::{CombatantId, EnemyId, IdAllocator, InstanceId};
pub use rng::{GameRng, GameRngState};
pub use config::{CombatConfig, InvariantPolicy};
pub use action::{ActionRecord, CombatAction};
pub use error::{CombatError, ContentError, InvariantViolation, PileError, SnapshotError};
