//! Enemy behavior engine.
//!
//! ## Key Types
//!
//! - `RawIntent` / `Intent`: authored intent record and its closed form
//! - `EnemyDefinition`: validated static data (cycle or phase table)
//! - `Enemy`: runtime enemy with hp, status and intent cursor
//! - `EnemyRegistry`: definition lookup and encounter building

pub mod behavior;
pub mod definition;
pub mod intent;
pub mod registry;

pub use behavior::{attack_damage, Enemy, EnemyBehavior, EnemyTurnReport, IntentContext};
pub use definition::{EnemyDefinition, IntentSource, Phase, RawEnemy, RawPhase};
pub use intent::{BuffStat, DebuffKind, Intent, IntentKind, RawIntent, MAX_HITS};
pub use registry::EnemyRegistry;
