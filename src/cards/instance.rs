//! Card instances - one physical copy of a card in a combat.
//!
//! Three Strikes in a deck are three instances sharing one definition but
//! carrying distinct `InstanceId`s. Instances are minted by the session when
//! a deck is loaded or when a card is added mid-combat, and live until the
//! session ends.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use crate::core::InstanceId;

/// A card instance in a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this copy.
    pub instance_id: InstanceId,

    /// The card this is a copy of.
    pub definition: CardDefinition,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub fn new(instance_id: InstanceId, definition: CardDefinition) -> Self {
        Self {
            instance_id,
            definition,
        }
    }

    /// Content key of the underlying card.
    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.definition.id
    }

    /// Energy cost.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.definition.cost
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}
