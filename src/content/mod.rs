//! Embedded starter content.
//!
//! A small card pool and enemy roster compiled into the crate, used by the
//! headless harness, the integration tests and the benchmarks.
//!
//! ```
//! use roguedeck::content;
//!
//! let cards = content::card_registry().unwrap();
//! let deck = content::starter_deck(&cards).unwrap();
//!
//! assert_eq!(deck.len(), 10);
//! ```

use crate::cards::{CardDefinition, CardRegistry};
use crate::core::ContentError;
use crate::enemies::{EnemyDefinition, EnemyRegistry};

/// Card pool JSON.
pub const CARDS_JSON: &str = include_str!("../../data/cards.json");

/// Enemy roster JSON.
pub const ENEMIES_JSON: &str = include_str!("../../data/enemies.json");

/// Starting deck: five Strikes, four Defends and a Bash.
pub const STARTER_DECK: [&str; 10] = [
    "strike", "strike", "strike", "strike", "strike", "defend", "defend", "defend", "defend", "bash",
];

/// Encounters by name, each a list of enemy keys in turn order.
pub const ENCOUNTERS: [(&str, &[&str]); 4] = [
    ("slime", &["slime"]),
    ("pair", &["jaw_worm", "cultist"]),
    ("haunt", &["wraith", "slime"]),
    ("boss", &["hollow_king"]),
];

pub fn card_registry() -> Result<CardRegistry, ContentError> {
    CardRegistry::from_json(CARDS_JSON)
}

pub fn enemy_registry() -> Result<EnemyRegistry, ContentError> {
    EnemyRegistry::from_json(ENEMIES_JSON)
}

/// The starter deck resolved against `cards`.
pub fn starter_deck(cards: &CardRegistry) -> Result<Vec<CardDefinition>, ContentError> {
    cards.build_deck(STARTER_DECK)
}

/// A named encounter resolved against `enemies`.
pub fn encounter(enemies: &EnemyRegistry, name: &str) -> Result<Vec<EnemyDefinition>, ContentError> {
    let (_, keys) = ENCOUNTERS
        .iter()
        .find(|(encounter, _)| *encounter == name)
        .ok_or_else(|| ContentError::UnknownEnemy(name.to_string()))?;
    enemies.build_encounter(keys.iter().copied())
}
