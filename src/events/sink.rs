//! Event delivery.
//!
//! Components push events into a session-owned [`EventQueue`] while an
//! operation runs. When the operation finishes, the session hands every new
//! event to its subscribers in order. Undelivered history stays in the
//! queue until [`EventQueue::drain`] is called.

use std::cell::RefCell;
use std::rc::Rc;

use super::event::CombatEvent;

/// Receives combat events.
pub trait EventSink {
    fn on_event(&mut self, event: &CombatEvent);
}

impl<F: FnMut(&CombatEvent)> EventSink for F {
    fn on_event(&mut self, event: &CombatEvent) {
        self(event);
    }
}

/// Ordered buffer of events emitted by one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
    /// Events before this index were already delivered to subscribers.
    delivered: usize,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last delivery.
    #[must_use]
    pub fn undelivered(&self) -> &[CombatEvent] {
        &self.events[self.delivered.min(self.events.len())..]
    }

    /// Hand undelivered events to each sink and mark them delivered.
    pub fn deliver(&mut self, sinks: &mut [Box<dyn EventSink>]) {
        for event in self.undelivered() {
            for sink in sinks.iter_mut() {
                sink.on_event(event);
            }
        }
        self.delivered = self.events.len();
    }

    /// Take every buffered event, delivered or not.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        self.delivered = 0;
        std::mem::take(&mut self.events)
    }

    /// Drop every buffered event.
    pub fn clear(&mut self) {
        self.events.clear();
        self.delivered = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }
}

/// A sink that records every event it receives.
///
/// Cloning yields another handle onto the same record, so a caller can
/// subscribe one clone and read through the other.
///
/// ```
/// use roguedeck::events::{CombatEvent, EventLog, EventSink};
///
/// let log = EventLog::new();
/// let mut sink = log.clone();
/// sink.on_event(&CombatEvent::CombatVictory { turn: 2 });
///
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<CombatEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<CombatEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Count recorded events matching a predicate.
    pub fn count(&self, mut pred: impl FnMut(&CombatEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
