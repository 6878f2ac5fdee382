//! Enemy definitions.
//!
//! An enemy either cycles through a flat intent list or follows a phase
//! table keyed on hp percentage. Raw content is validated and normalized
//! here; a definition that loads is always executable.

use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentKind, RawIntent, MAX_HITS};
use crate::core::ContentError;

/// One entry of a phase table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    /// The phase applies while hp is at or below this percent of max.
    pub hp_threshold: i64,
    /// Non-empty.
    pub intents: Vec<Intent>,
    /// Applied once when the phase is entered. Buff or heal only.
    pub on_enter: Option<Intent>,
}

/// Where an enemy's intents come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentSource {
    /// Wrap around a non-empty list.
    Cycle(Vec<Intent>),
    /// Non-empty phase table, sorted by threshold descending.
    Phased(Vec<Phase>),
}

impl IntentSource {
    /// Every intent in the source, phase `on_enter` effects included.
    pub fn all_intents(&self) -> Box<dyn Iterator<Item = &Intent> + '_> {
        match self {
            IntentSource::Cycle(intents) => Box::new(intents.iter()),
            IntentSource::Phased(phases) => Box::new(
                phases
                    .iter()
                    .flat_map(|phase| phase.intents.iter().chain(phase.on_enter.iter())),
            ),
        }
    }
}

/// Normalized static enemy data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    /// Content key.
    pub id: String,
    pub name: String,
    pub max_hp: i64,
    pub source: IntentSource,
}

impl EnemyDefinition {
    /// A cycling enemy. Not validated; see [`EnemyDefinition::validate`].
    #[must_use]
    pub fn cycling(id: impl Into<String>, name: impl Into<String>, max_hp: i64, intents: Vec<Intent>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            source: IntentSource::Cycle(intents),
        }
    }

    /// A phased enemy. The table is sorted by threshold descending.
    #[must_use]
    pub fn phased(id: impl Into<String>, name: impl Into<String>, max_hp: i64, mut phases: Vec<Phase>) -> Self {
        sort_phases(&mut phases);
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            source: IntentSource::Phased(phases),
        }
    }

    /// Check the structural rules that ingestion enforces.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.max_hp <= 0 {
            return Err(ContentError::InvalidHp {
                enemy: self.id.clone(),
                hp: self.max_hp,
            });
        }
        let too_many_hits = self.source.all_intents().find_map(|intent| {
            let (_, hits) = intent.attack()?;
            (hits > MAX_HITS).then_some((intent.kind(), hits))
        });
        if let Some((kind, hits)) = too_many_hits {
            return Err(ContentError::TooManyHits {
                kind: kind.as_str().to_string(),
                hits: i64::from(hits),
            });
        }

        match &self.source {
            IntentSource::Cycle(intents) if intents.is_empty() => Err(ContentError::NoIntents {
                enemy: self.id.clone(),
            }),
            IntentSource::Cycle(_) => Ok(()),
            IntentSource::Phased(phases) if phases.is_empty() => Err(ContentError::NoIntents {
                enemy: self.id.clone(),
            }),
            IntentSource::Phased(phases) => phases.iter().try_for_each(|phase| self.validate_phase(phase)),
        }
    }

    fn validate_phase(&self, phase: &Phase) -> Result<(), ContentError> {
        if phase.intents.is_empty() {
            return Err(ContentError::EmptyPhase {
                enemy: self.id.clone(),
                phase: phase.name.clone(),
            });
        }
        if !(0..=100).contains(&phase.hp_threshold) {
            return Err(ContentError::InvalidThreshold {
                enemy: self.id.clone(),
                phase: phase.name.clone(),
                threshold: phase.hp_threshold,
            });
        }
        if let Some(on_enter) = &phase.on_enter {
            if !matches!(on_enter.kind(), IntentKind::Buff | IntentKind::Heal) {
                return Err(ContentError::InvalidOnEnter {
                    enemy: self.id.clone(),
                    phase: phase.name.clone(),
                    kind: on_enter.kind().as_str().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Normalize and validate a raw content record.
    pub fn from_raw(raw: RawEnemy) -> Result<Self, ContentError> {
        let definition = match (raw.intents, raw.phases) {
            (Some(_), Some(_)) => {
                return Err(ContentError::ConflictingIntentSources { enemy: raw.id });
            }
            (Some(intents), None) => {
                let intents = intents.iter().map(Intent::from_raw).collect::<Result<Vec<_>, _>>()?;
                Self::cycling(raw.id, raw.name, raw.hp, intents)
            }
            (None, Some(phases)) => {
                let phases = phases
                    .into_iter()
                    .map(Phase::from_raw)
                    .collect::<Result<Vec<_>, _>>()?;
                Self::phased(raw.id, raw.name, raw.hp, phases)
            }
            (None, None) => return Err(ContentError::NoIntents { enemy: raw.id }),
        };

        definition.validate()?;
        Ok(definition)
    }

    /// Parse and normalize one enemy from JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let raw: RawEnemy = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }
}

impl Phase {
    fn from_raw(raw: RawPhase) -> Result<Self, ContentError> {
        Ok(Self {
            intents: raw.intents.iter().map(Intent::from_raw).collect::<Result<_, _>>()?,
            on_enter: raw.on_enter.as_ref().map(Intent::from_raw).transpose()?,
            name: raw.name,
            hp_threshold: raw.hp_threshold,
        })
    }
}

// Stable, so equal thresholds keep their authored order.
fn sort_phases(phases: &mut [Phase]) {
    phases.sort_by(|a, b| b.hp_threshold.cmp(&a.hp_threshold));
}

/// Enemy record as authored in content JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEnemy {
    pub id: String,
    pub name: String,
    pub hp: i64,
    #[serde(default)]
    pub intents: Option<Vec<RawIntent>>,
    #[serde(default)]
    pub phases: Option<Vec<RawPhase>>,
}

/// Phase record as authored in content JSON.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPhase {
    pub hp_threshold: i64,
    pub name: String,
    pub intents: Vec<RawIntent>,
    #[serde(default)]
    pub on_enter: Option<RawIntent>,
}
