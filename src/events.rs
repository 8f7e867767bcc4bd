//! Session notifications.
//!
//! [`BrewSession`](crate::session::BrewSession) publishes every phase change
//! and every finished drink here. Receivers only see what is sent after
//! they subscribe.

use tokio::sync::broadcast;

use crate::session::Phase;

/// Backlog a slow receiver can fall behind before it starts lagging.
const CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The session moved between UI phases.
    PhaseChanged { from: Phase, to: Phase },
    /// A drink card is ready for `mood`.
    Brewed { mood: String, drink_name: String },
}

impl Event {
    /// The phase entered, for phase changes.
    pub fn entered(&self) -> Option<Phase> {
        match self {
            Self::PhaseChanged { to, .. } => Some(*to),
            Self::Brewed { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    /// Publish to current subscribers. Returns how many will see it;
    /// nobody listening is not an error.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or_default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(CAPACITY)
    }
}
