//! Enemy definition lookup.

use rustc_hash::FxHashMap;

use super::definition::{EnemyDefinition, RawEnemy};
use crate::core::ContentError;

/// Registry of validated enemy definitions, keyed by content id.
///
/// ```
/// use roguedeck::enemies::EnemyRegistry;
///
/// let registry = EnemyRegistry::from_json(
///     r#"[{"id": "slime", "name": "Slime", "hp": 12, "intents": [{"type": "attack", "damage": 3}]}]"#,
/// )
/// .unwrap();
///
/// assert_eq!(registry.build_encounter(["slime", "slime"]).unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EnemyRegistry {
    enemies: FxHashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of enemy records.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        registry.load_json(json)?;
        Ok(registry)
    }

    /// Parse a JSON array of enemy records into this registry.
    ///
    /// Nothing is registered if any record fails validation.
    pub fn load_json(&mut self, json: &str) -> Result<usize, ContentError> {
        let raw: Vec<RawEnemy> = serde_json::from_str(json)?;
        let enemies = raw
            .into_iter()
            .map(EnemyDefinition::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = rustc_hash::FxHashSet::default();
        for enemy in &enemies {
            if self.enemies.contains_key(&enemy.id) || !seen.insert(enemy.id.as_str()) {
                return Err(ContentError::DuplicateId(enemy.id.clone()));
            }
        }

        let count = enemies.len();
        for enemy in enemies {
            self.enemies.insert(enemy.id.clone(), enemy);
        }
        Ok(count)
    }

    /// Register a definition after validating it.
    pub fn register(&mut self, enemy: EnemyDefinition) -> Result<(), ContentError> {
        enemy.validate()?;
        if self.enemies.contains_key(&enemy.id) {
            return Err(ContentError::DuplicateId(enemy.id));
        }
        self.enemies.insert(enemy.id.clone(), enemy);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.enemies.contains_key(id)
    }

    /// Resolve a list of keys into definitions, one per enemy in the fight.
    pub fn build_encounter<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<EnemyDefinition>, ContentError> {
        keys.into_iter()
            .map(|key| {
                self.get(key)
                    .cloned()
                    .ok_or_else(|| ContentError::UnknownEnemy(key.to_string()))
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.values()
    }
}
