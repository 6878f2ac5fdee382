//! # roguedeck
//!
//! Combat-resolution core for a turn-based deck-building roguelike.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The core is pure state plus emitted notifications.
//!    Rendering, audio and pacing live in adapters that subscribe to
//!    `CombatEvent`s.
//!
//! 2. **Session-Owned State**: A `CombatSession` owns its piles, combatants,
//!    RNG and event queue. There are no globals, so sessions never interfere.
//!
//! 3. **Normalize at the Boundary**: Card shorthand fields and loose intent
//!    records are turned into one effect list and one closed intent enum at
//!    ingestion; combat code never inspects strings.
//!
//! 4. **Fail Soft**: Rejected commands return an error and change nothing.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles and history use `im` vectors,
//!   so snapshots are cheap.
//!
//! - **Deterministic RNG**: One seeded ChaCha8 stream per session drives
//!   every shuffle; its position is part of the snapshot.
//!
//! - **Integer Arithmetic**: All combat numbers are `i64` with guarded
//!   steps; a step that would overflow keeps the last good value.
//!
//! ## Modules
//!
//! - `core`: IDs, RNG, configuration, errors, numeric guards, commands
//! - `cards`: Card definitions, instances and registry
//! - `piles`: Draw, hand, discard and exhaust bookkeeping
//! - `status`: Status counters, combatants, corruption
//! - `effects`: Effect descriptors, targeting and resolution
//! - `enemies`: Intents, definitions, phase tables and execution
//! - `events`: Outbound notifications and subscribers
//! - `session`: The turn cycle, public operations and snapshots
//! - `content`: Embedded starter deck and enemy roster

pub mod core;
pub mod cards;
pub mod piles;
pub mod status;
pub mod effects;
pub mod enemies;
pub mod events;
pub mod session;
pub mod content;

// Re-export commonly used types
pub use crate::core::{
    CombatantId, EnemyId, InstanceId, IdAllocator,
    GameRng, GameRngState,
    CombatConfig, InvariantPolicy,
    CombatAction, ActionRecord,
    CombatError, ContentError, InvariantViolation, PileError, SnapshotError,
};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, CardType};

pub use crate::piles::{DrawOutcome, PileCounts, PileKind, PileStore};

pub use crate::status::{
    Combatant, CorruptionMeter, PlayerProfile, PlayerState, StatusKind, StatusTracker,
};

pub use crate::effects::{Effect, EffectKind, EffectResolver, ResolutionResult, ResolverContext};

pub use crate::enemies::{
    Enemy, EnemyDefinition, EnemyRegistry, Intent, IntentKind, IntentSource, Phase,
};

pub use crate::events::{CombatEvent, EventLog, EventQueue, EventSink};

pub use crate::session::{
    CardLedger, CombatSession, CombatSnapshot, CombatStatus, PlayOutcome, TurnSummary,
};
