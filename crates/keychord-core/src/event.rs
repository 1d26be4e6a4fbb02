//! Key event types delivered by the host input surface.
//!
//! Events carry the raw key identity as reported by the host; the dispatcher
//! normalizes it with [`crate::KeyToken::normalize`]. Each event carries an
//! [`EventBase`] whose accept flag is the "prevent default" affordance: a
//! listener that accepts a key-down tells the host not to run its default
//! handling for that key (inserting a character, triggering a browser
//! action, and so on).

/// Common data for all key events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new, unaccepted event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing the host's default handling.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing default host handling.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Key press event, sent when a key goes down.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The raw key identity as reported by the host (not yet normalized).
    pub key: String,
    /// Whether this is an OS auto-repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: impl Into<String>, is_repeat: bool) -> Self {
        Self {
            base: EventBase::new(),
            key: key.into(),
            is_repeat,
        }
    }
}

/// Key release event, sent when a key comes up.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The raw key identity as reported by the host (not yet normalized).
    pub key: String,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            base: EventBase::new(),
            key: key.into(),
        }
    }
}
