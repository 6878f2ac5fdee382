//! Enemy intents.
//!
//! Content declares intents as loose records `{type, damage?, value?,
//! hits?, effect?}`. They are normalized once, at ingestion, into the
//! closed [`Intent`] enum; execution never looks at strings.
//!
//! ## Normalization
//!
//! - `attack`, `heavy_attack`, `multi_attack`: need `damage` (or `value`);
//!   `hits` defaults to 1 and may not exceed [`MAX_HITS`]
//! - `block` (alias `defend`): needs `value`
//! - `buff`: needs `value`; `effect` is `strength` (default) or `armor`
//! - `debuff`: needs `value` and an `effect` of `corruption`, `weak` or
//!   `vulnerable`
//! - `heal`: needs `value`

use serde::{Deserialize, Serialize};

use crate::core::ContentError;

/// Upper bound on hits per attack intent.
pub const MAX_HITS: u32 = 99;

/// Intent record as authored in enemy JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIntent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub damage: Option<i64>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub hits: Option<i64>,
    #[serde(default)]
    pub effect: Option<String>,
}

/// The seven intent categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Attack,
    HeavyAttack,
    MultiAttack,
    Block,
    Buff,
    Debuff,
    Heal,
}

impl IntentKind {
    /// Parse a content type name. `defend` is an alias for `block`.
    pub fn parse(name: &str) -> Result<Self, ContentError> {
        match name {
            "attack" => Ok(IntentKind::Attack),
            "heavy_attack" | "heavyAttack" => Ok(IntentKind::HeavyAttack),
            "multi_attack" | "multiAttack" => Ok(IntentKind::MultiAttack),
            "block" | "defend" => Ok(IntentKind::Block),
            "buff" => Ok(IntentKind::Buff),
            "debuff" => Ok(IntentKind::Debuff),
            "heal" => Ok(IntentKind::Heal),
            other => Err(ContentError::UnknownIntentType(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IntentKind::Attack => "attack",
            IntentKind::HeavyAttack => "heavy_attack",
            IntentKind::MultiAttack => "multi_attack",
            IntentKind::Block => "block",
            IntentKind::Buff => "buff",
            IntentKind::Debuff => "debuff",
            IntentKind::Heal => "heal",
        }
    }
}

/// Stat raised by a buff intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffStat {
    Strength,
    /// Gains block.
    Armor,
}

/// What a debuff intent applies to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebuffKind {
    Corruption,
    Weak,
    Vulnerable,
}

/// A normalized enemy intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Attack { damage: i64, hits: u32 },
    HeavyAttack { damage: i64, hits: u32 },
    MultiAttack { damage: i64, hits: u32 },
    Block { amount: i64 },
    Buff { stat: BuffStat, amount: i64 },
    Debuff { kind: DebuffKind, amount: i64 },
    Heal { amount: i64 },
}

impl Intent {
    /// Normalize a content record.
    ///
    /// ```
    /// use roguedeck::enemies::{Intent, RawIntent};
    ///
    /// let raw = RawIntent { kind: "defend".into(), value: Some(6), ..RawIntent::default() };
    /// assert_eq!(Intent::from_raw(&raw).unwrap(), Intent::Block { amount: 6 });
    /// ```
    pub fn from_raw(raw: &RawIntent) -> Result<Self, ContentError> {
        let kind = IntentKind::parse(&raw.kind)?;
        let missing = |field: &'static str| ContentError::MissingIntentField {
            kind: raw.kind.clone(),
            field,
        };
        let value = || raw.value.ok_or_else(|| missing("value"));

        let intent = match kind {
            IntentKind::Attack | IntentKind::HeavyAttack | IntentKind::MultiAttack => {
                let damage = raw.damage.or(raw.value).ok_or_else(|| missing("damage"))?;
                let hits = raw.hits.unwrap_or(1).max(0);
                let hits = u32::try_from(hits)
                    .ok()
                    .filter(|&h| h <= MAX_HITS)
                    .ok_or_else(|| ContentError::TooManyHits {
                        kind: raw.kind.clone(),
                        hits,
                    })?;
                match kind {
                    IntentKind::Attack => Intent::Attack { damage, hits },
                    IntentKind::HeavyAttack => Intent::HeavyAttack { damage, hits },
                    _ => Intent::MultiAttack { damage, hits },
                }
            }
            IntentKind::Block => Intent::Block { amount: value()? },
            IntentKind::Buff => {
                let stat = match raw.effect.as_deref() {
                    None | Some("strength") => BuffStat::Strength,
                    Some("armor") => BuffStat::Armor,
                    Some(other) => return Err(unknown_effect(raw, other)),
                };
                Intent::Buff { stat, amount: value()? }
            }
            IntentKind::Debuff => {
                let kind = match raw.effect.as_deref() {
                    Some("corruption") => DebuffKind::Corruption,
                    Some("weak") => DebuffKind::Weak,
                    Some("vulnerable") => DebuffKind::Vulnerable,
                    Some(other) => return Err(unknown_effect(raw, other)),
                    None => return Err(missing("effect")),
                };
                Intent::Debuff { kind, amount: value()? }
            }
            IntentKind::Heal => Intent::Heal { amount: value()? },
        };
        Ok(intent)
    }

    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Intent::Attack { .. } => IntentKind::Attack,
            Intent::HeavyAttack { .. } => IntentKind::HeavyAttack,
            Intent::MultiAttack { .. } => IntentKind::MultiAttack,
            Intent::Block { .. } => IntentKind::Block,
            Intent::Buff { .. } => IntentKind::Buff,
            Intent::Debuff { .. } => IntentKind::Debuff,
            Intent::Heal { .. } => IntentKind::Heal,
        }
    }

    /// `(damage, hits)` for the attack kinds.
    #[must_use]
    pub const fn attack(&self) -> Option<(i64, u32)> {
        match *self {
            Intent::Attack { damage, hits }
            | Intent::HeavyAttack { damage, hits }
            | Intent::MultiAttack { damage, hits } => Some((damage, hits)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Attack { damage, hits }
            | Intent::HeavyAttack { damage, hits }
            | Intent::MultiAttack { damage, hits } => {
                if *hits == 1 {
                    write!(f, "{} {}", self.kind().as_str(), damage)
                } else {
                    write!(f, "{} {}x{}", self.kind().as_str(), damage, hits)
                }
            }
            Intent::Block { amount } => write!(f, "block {amount}"),
            Intent::Buff { stat, amount } => write!(f, "buff {stat:?} {amount}"),
            Intent::Debuff { kind, amount } => write!(f, "debuff {kind:?} {amount}"),
            Intent::Heal { amount } => write!(f, "heal {amount}"),
        }
    }
}

fn unknown_effect(raw: &RawIntent, effect: &str) -> ContentError {
    ContentError::UnknownIntentEffect {
        kind: raw.kind.clone(),
        effect: effect.to_string(),
    }
}
