//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: "Strike" costs
//! 1 and deals 6 damage no matter which copy is played. Which copy is where
//! is tracked separately by `CardInstance`.
//!
//! ## Ingestion
//!
//! Content JSON may describe effects two ways: a generic `effects` array,
//! or legacy shorthand fields such as `"damage": 6`. [`RawCard`] accepts
//! both and [`CardDefinition::from_raw`] folds them into one ordered effect
//! list. Shorthand effects come first, in a fixed order; a shorthand kind
//! that also appears in the explicit list is dropped so it is never applied
//! twice.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ContentError;
use crate::effects::{Effect, EffectKind};

/// Content key of a card ("strike", "bash", ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Corrupted,
    Curse,
}

/// Effect list storage; most cards carry one to three effects.
pub type EffectList = SmallVec<[Effect; 4]>;

/// Static card definition in normalized form.
///
/// ```
/// use roguedeck::cards::{CardDefinition, CardType};
/// use roguedeck::effects::Effect;
///
/// let bash = CardDefinition::new("bash", "Bash", CardType::Attack, 2)
///     .with_effect(Effect::damage(8))
///     .with_effect(Effect::vulnerable(2));
///
/// assert!(bash.requires_target());
/// assert!(bash.is_playable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Content key.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Card type.
    pub card_type: CardType,

    /// Energy cost.
    pub cost: i64,

    /// Effects, applied in order.
    pub effects: EffectList,

    pub upgraded: bool,

    /// Goes to the exhaust pile instead of discard when played.
    pub exhaust: bool,

    /// Can never be played from hand.
    pub unplayable: bool,
}

impl CardDefinition {
    /// Create a new card definition with no effects.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType, cost: i64) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type,
            cost,
            effects: SmallVec::new(),
            upgraded: false,
            exhaust: false,
            unplayable: false,
        }
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Mark as exhausting (builder pattern).
    #[must_use]
    pub fn exhausting(mut self) -> Self {
        self.exhaust = true;
        self
    }

    /// Mark as unplayable (builder pattern).
    #[must_use]
    pub fn unplayable(mut self) -> Self {
        self.unplayable = true;
        self
    }

    /// Can this card be played from hand at all?
    ///
    /// Curses are never playable, regardless of the flag.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.unplayable && self.card_type != CardType::Curse
    }

    /// Does any effect need an enemy target?
    #[must_use]
    pub fn requires_target(&self) -> bool {
        self.effects.iter().any(|e| e.kind.is_targeted())
    }

    /// Sum of all values of one effect kind.
    #[must_use]
    pub fn total(&self, kind: EffectKind) -> i64 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0i64, |acc, e| acc.saturating_add(e.value))
    }

    /// Normalize a raw content record.
    #[must_use]
    pub fn from_raw(raw: RawCard) -> Self {
        let explicit = raw.effects.unwrap_or_default();

        let shorthand = [
            (EffectKind::Damage, raw.damage),
            (EffectKind::Block, raw.block),
            (EffectKind::Draw, raw.draw),
            (EffectKind::Energy, raw.energy),
            (EffectKind::Vulnerable, raw.vulnerable),
            (EffectKind::Weak, raw.weak),
            (EffectKind::Strength, raw.strength),
            (EffectKind::Heal, raw.heal),
            (EffectKind::SelfDamage, raw.self_damage),
        ];

        let mut effects: EffectList = shorthand
            .into_iter()
            .filter_map(|(kind, value)| value.map(|v| Effect::new(kind, v)))
            .filter(|e| !explicit.iter().any(|x| x.kind == e.kind))
            .collect();
        effects.extend(explicit);

        Self {
            id: CardId(raw.id),
            name: raw.name,
            card_type: raw.card_type,
            cost: raw.cost,
            effects,
            upgraded: raw.upgraded,
            exhaust: raw.exhaust,
            unplayable: raw.unplayable,
        }
    }

    /// Parse and normalize one card from JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let raw: RawCard = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }
}

/// Card record as authored in content JSON.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub effects: Option<Vec<Effect>>,
    #[serde(default)]
    pub exhaust: bool,
    #[serde(default)]
    pub unplayable: bool,
    #[serde(default)]
    pub upgraded: bool,

    // Legacy shorthand fields.
    #[serde(default)]
    pub damage: Option<i64>,
    #[serde(default)]
    pub block: Option<i64>,
    #[serde(default)]
    pub draw: Option<i64>,
    #[serde(default)]
    pub energy: Option<i64>,
    #[serde(default)]
    pub vulnerable: Option<i64>,
    #[serde(default)]
    pub weak: Option<i64>,
    #[serde(default)]
    pub strength: Option<i64>,
    #[serde(default)]
    pub heal: Option<i64>,
    #[serde(default)]
    pub self_damage: Option<i64>,
}
