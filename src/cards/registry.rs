//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every normalized card definition loaded from
//! content. It provides lookup by content key and turns a list of keys into
//! a deck ready to hand to a combat session.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType, RawCard};
use crate::core::ContentError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use roguedeck::cards::CardRegistry;
///
/// let registry = CardRegistry::from_json(
///     r#"[{"id": "strike", "name": "Strike", "type": "attack", "cost": 1, "damage": 6}]"#,
/// )
/// .unwrap();
///
/// let deck = registry.build_deck(["strike", "strike"]).unwrap();
/// assert_eq!(deck.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        registry.load_json(json)?;
        Ok(registry)
    }

    /// Parse a JSON array of card records into this registry.
    ///
    /// Nothing is registered if any record is malformed or duplicated.
    pub fn load_json(&mut self, json: &str) -> Result<usize, ContentError> {
        let raw: Vec<RawCard> = serde_json::from_str(json)?;
        let cards: Vec<CardDefinition> = raw.into_iter().map(CardDefinition::from_raw).collect();

        let mut seen = rustc_hash::FxHashSet::default();
        for card in &cards {
            if self.cards.contains_key(&card.id) || !seen.insert(card.id.clone()) {
                return Err(ContentError::DuplicateId(card.id.to_string()));
            }
        }

        let count = cards.len();
        for card in cards {
            self.cards.insert(card.id.clone(), card);
        }
        Ok(count)
    }

    /// Register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), ContentError> {
        if self.cards.contains_key(&card.id) {
            return Err(ContentError::DuplicateId(card.id.to_string()));
        }
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Get a card definition by key.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(&CardId::new(id))
    }

    /// Check if a key is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a list of keys into definitions, one per copy.
    pub fn build_deck<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<CardDefinition>, ContentError> {
        keys.into_iter()
            .map(|key| {
                self.get(key)
                    .cloned()
                    .ok_or_else(|| ContentError::UnknownCard(key.to_string()))
            })
            .collect()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }
}
