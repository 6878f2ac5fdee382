//! Card instance accounting.

use serde::{Deserialize, Serialize};

/// Counts instances introduced into and explicitly removed from a combat.
///
/// The piles must always hold exactly `introduced - removed` instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLedger {
    pub introduced: usize,
    pub removed: usize,
}

impl CardLedger {
    /// A ledger for a freshly loaded deck.
    #[must_use]
    pub fn with_deck(size: usize) -> Self {
        Self {
            introduced: size,
            removed: 0,
        }
    }

    /// Instances the piles must currently hold.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.introduced.saturating_sub(self.removed)
    }

    pub fn introduce(&mut self) {
        self.introduced += 1;
    }

    pub fn remove(&mut self) {
        self.removed += 1;
    }

    /// Re-anchor the ledger on an observed pile total.
    pub fn reset_to(&mut self, observed: usize) {
        self.introduced = observed + self.removed;
    }
}
