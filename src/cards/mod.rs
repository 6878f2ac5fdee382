//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Content key for card definitions
//! - `CardType`: attack, skill, power, corrupted or curse
//! - `CardDefinition`: Normalized static card data with an ordered effect list
//! - `RawCard`: Card record as authored in content JSON
//! - `CardInstance`: One physical copy inside a combat
//! - `CardRegistry`: Card definition lookup and deck building

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardType, EffectList, RawCard};
pub use instance::CardInstance;
pub use registry::CardRegistry;
