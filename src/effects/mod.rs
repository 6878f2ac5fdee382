//! Card effects: descriptors, targeting and resolution.
//!
//! - `Effect` / `EffectKind`: one `{kind, value}` step of a card
//! - `select_target`: picks the enemy a play acts on
//! - `EffectResolver`: applies a card's effects in declared order

mod effect;
mod resolver;
mod targeting;

pub use effect::{Effect, EffectKind};
pub use resolver::{
    apply_corruption, card_damage, damage_event, draw_cards, status_event, EffectResolver, ResolutionResult,
    ResolverContext,
};
pub use targeting::{candidate_targets, select_target};
