//! Combat configuration.
//!
//! Sessions are configured at construction time with a `CombatConfig`.
//! Every field has a default matching the standard ruleset, so callers
//! only override what they need:
//!
//! ```
//! use roguedeck::core::{CombatConfig, InvariantPolicy};
//!
//! let config = CombatConfig::default()
//!     .with_max_hand_size(8)
//!     .with_invariant_policy(InvariantPolicy::Repair);
//!
//! assert_eq!(config.max_hand_size, 8);
//! assert_eq!(config.starting_hand_size, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// What to do when a bookkeeping invariant is found broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvariantPolicy {
    /// Panic immediately. Used during development and tests.
    Panic,
    /// Log the violation, reinitialize the offending counter and continue.
    Repair,
}

impl Default for InvariantPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            InvariantPolicy::Panic
        } else {
            InvariantPolicy::Repair
        }
    }
}

/// Tunable combat rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Cards drawn when combat starts.
    pub starting_hand_size: usize,

    /// Cards drawn at the start of every later player turn.
    pub draw_per_turn: usize,

    /// Hand size limit. Draws that would exceed it are left in the draw pile.
    pub max_hand_size: usize,

    /// Energy the player refills to each turn.
    pub base_energy: i64,

    /// Corruption levels that fire a notification when crossed upward.
    pub corruption_thresholds: Vec<i64>,

    /// Reaction to a broken invariant.
    pub invariant_policy: InvariantPolicy,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            draw_per_turn: 5,
            max_hand_size: 10,
            base_energy: 3,
            corruption_thresholds: vec![25, 50, 75, 100],
            invariant_policy: InvariantPolicy::default(),
        }
    }
}

impl CombatConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.corruption_thresholds.sort_unstable();
        config.corruption_thresholds.dedup();
        Ok(config)
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the per-turn draw.
    #[must_use]
    pub fn with_draw_per_turn(mut self, count: usize) -> Self {
        self.draw_per_turn = count;
        self
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the per-turn energy.
    #[must_use]
    pub fn with_base_energy(mut self, energy: i64) -> Self {
        self.base_energy = energy;
        self
    }

    /// Replace the corruption thresholds.
    #[must_use]
    pub fn with_corruption_thresholds(mut self, thresholds: impl IntoIterator<Item = i64>) -> Self {
        self.corruption_thresholds = thresholds.into_iter().collect();
        self.corruption_thresholds.sort_unstable();
        self.corruption_thresholds.dedup();
        self
    }

    /// Set the invariant policy.
    #[must_use]
    pub fn with_invariant_policy(mut self, policy: InvariantPolicy) -> Self {
        self.invariant_policy = policy;
        self
    }
}
