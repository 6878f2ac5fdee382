//! Combat session: turn orchestration, public operations and snapshots.

mod combat;
mod ledger;
mod snapshot;

pub use combat::{CombatSession, CombatStatus, PlayOutcome, TurnSummary};
pub use ledger::CardLedger;
pub use snapshot::CombatSnapshot;
