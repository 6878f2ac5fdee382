//! Card piles.
//!
//! The pile store is pure bookkeeping: it moves card instances between the
//! draw pile, hand, discard pile and exhaust pile and never interprets card
//! rules. Cards are only created or dropped through explicit calls.

mod store;

pub use store::{DrawOutcome, PileCounts, PileKind, PileStore};
