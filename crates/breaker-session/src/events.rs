//! Session event contracts.
//!
//! Events are emitted after a state transition has been committed, including
//! any credential write. They represent observable consequences of session
//! changes; sinks observe, they cannot veto.

use crate::types::Identity;

/// A domain event emitted by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A verification code was requested for a phone number.
    CodeRequested { phone_number: String },
    /// A login completed and the credential was persisted.
    LoggedIn { identity: Identity },
    /// The session was cleared and the credential removed.
    LoggedOut,
    /// The cached profile was replaced with a fresh copy.
    ProfileRefreshed { identity: Identity },
    /// A persisted session was restored at process start.
    SessionRestored { identity: Identity },
    /// The backend rejected the credential and the session was discarded.
    SessionRevoked,
}

/// A sink that receives session events.
///
/// Implementations decide what events mean (navigation, notifications,
/// analytics). Emission happens after the transition is committed.
pub trait SessionEventSink: Send + Sync {
    /// Emit an event.
    fn emit(&self, event: SessionEvent);
}

/// A no-op sink that discards all events.
#[derive(Debug, Default)]
pub struct NullSink;

impl SessionEventSink for NullSink {
    fn emit(&self, _event: SessionEvent) {
        // Intentionally empty - discard all events
    }
}

/// A sink that records all events for testing.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    /// Creates a new recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.events.lock().expect("lock poisoned").clear();
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("lock poisoned").len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionEventSink for RecordingSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}
