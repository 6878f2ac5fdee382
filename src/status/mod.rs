//! Status tracking: per-combatant counters, combatant records and the
//! corruption meter.
//!
//! ## Key Types
//!
//! - `StatusTracker`: block, strength, dexterity, vulnerable and weak
//! - `Combatant`: hp plus a status tracker
//! - `PlayerState`: the player combatant plus energy
//! - `PlayerProfile`: run-level player stats handed into a combat
//! - `CorruptionMeter`: clamped corruption with threshold reporting

pub mod combatant;
pub mod corruption;
pub mod tracker;

pub use combatant::{Combatant, DamageReport, PlayerProfile, PlayerState};
pub use corruption::{CorruptionChange, CorruptionMeter, MAX_CORRUPTION};
pub use tracker::{StatusKind, StatusTracker};
