//! Outbound notifications.
//!
//! - `CombatEvent`: what happened
//! - `EventQueue`: per-session buffer, drained by the caller
//! - `EventSink`: subscriber trait (closures implement it)
//! - `EventLog`: recording sink for tests and headless drivers

mod event;
mod sink;

pub use event::CombatEvent;
pub use sink::{EventLog, EventQueue, EventSink};
