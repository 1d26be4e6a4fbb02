//! Host input-source abstraction.
//!
//! The engine's only inbound boundary is an [`InputSource`]: any ambient
//! surface that can deliver raw key identities with an accept (prevent
//! default) affordance. Implementations bridge whatever the host provides: a
//! windowing system's keyboard events, a webview bridge, a terminal backend.
//!
//! [`SimulatedInput`] is an in-process source fed by synthesized events. It
//! backs the test suite and works for embedders that translate their own
//! event stream by hand.

use std::sync::{Arc, Weak};

use keychord_core::{KeyPressEvent, KeyReleaseEvent};
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for an attached key listener.
    ///
    /// Returned by [`InputSource::attach`]; use it to detach later.
    pub struct ListenerId;
}

/// Receiver of raw key events delivered by an [`InputSource`].
pub trait KeyListener: Send + Sync {
    /// A key went down. Accept the event to suppress host default handling.
    fn key_pressed(&self, event: &mut KeyPressEvent);

    /// A key came up.
    fn key_released(&self, event: &mut KeyReleaseEvent);
}

/// A host surface that can deliver key-press/key-release notifications.
///
/// Implementations must not deliver events synchronously from within
/// [`attach`](Self::attach) or [`detach`](Self::detach); listeners may hold
/// their own locks across those calls.
pub trait InputSource: Send + Sync {
    /// Attach a listener; it receives every subsequent key event.
    ///
    /// Implementations hold the listener weakly: keeping it alive is the
    /// caller's responsibility, and a dropped listener stops receiving
    /// events without an explicit detach.
    fn attach(&self, listener: Arc<dyn KeyListener>) -> ListenerId;

    /// Detach a previously attached listener.
    ///
    /// Returns `true` if the listener was found and removed.
    fn detach(&self, id: ListenerId) -> bool;
}

/// An in-process input source fed by synthesized key events.
///
/// Listeners are held weakly: attaching does not keep a listener alive, so
/// an engine and this source never form a reference cycle. A listener whose
/// last strong reference is dropped is pruned on the next delivery.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use keychord::{ShortcutDefinition, ShortcutEngine, SimulatedInput};
///
/// let input = Arc::new(SimulatedInput::new());
/// let engine = ShortcutEngine::new(input.clone());
/// engine
///     .register(ShortcutDefinition::new(
///         "find",
///         ["Meta", "F"],
///         "Focus search",
///         || Ok(()),
///     ))
///     .unwrap();
/// engine.start();
///
/// input.press("Meta");
/// assert!(input.press("f")); // chord completed, default suppressed
/// ```
#[derive(Default)]
pub struct SimulatedInput {
    listeners: Mutex<SlotMap<ListenerId, Weak<dyn KeyListener>>>,
}

impl SimulatedInput {
    /// Create a source with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Deliver a key-down for `key`.
    ///
    /// Returns `true` if any listener accepted the event, meaning a real
    /// host would have suppressed its default handling.
    pub fn press(&self, key: &str) -> bool {
        self.deliver_press(key, false)
    }

    /// Deliver a key-down flagged as OS auto-repeat.
    pub fn repeat(&self, key: &str) -> bool {
        self.deliver_press(key, true)
    }

    /// Deliver a key-up for `key`.
    pub fn release(&self, key: &str) {
        let mut event = KeyReleaseEvent::new(key);
        for listener in self.current_listeners() {
            listener.key_released(&mut event);
        }
    }

    /// Press every key of `chord` in order, then release them in reverse.
    ///
    /// Returns `true` if any key-down was accepted.
    pub fn tap_chord(&self, chord: &[&str]) -> bool {
        let mut accepted = false;
        for key in chord {
            accepted |= self.press(key);
        }
        for key in chord.iter().rev() {
            self.release(key);
        }
        accepted
    }

    /// Number of currently attached, still-alive listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .values()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    fn deliver_press(&self, key: &str, is_repeat: bool) -> bool {
        let mut event = KeyPressEvent::new(key, is_repeat);
        for listener in self.current_listeners() {
            listener.key_pressed(&mut event);
        }
        event.base.is_accepted()
    }

    // Snapshot outside the lock so a listener can attach or detach from
    // within its own callback. Dead entries are pruned here.
    fn current_listeners(&self) -> Vec<Arc<dyn KeyListener>> {
        let mut listeners = self.listeners.lock();
        let mut live = Vec::with_capacity(listeners.len());
        listeners.retain(|_, listener| match listener.upgrade() {
            Some(strong) => {
                live.push(strong);
                true
            }
            None => false,
        });
        live
    }
}

impl InputSource for SimulatedInput {
    fn attach(&self, listener: Arc<dyn KeyListener>) -> ListenerId {
        self.listeners.lock().insert(Arc::downgrade(&listener))
    }

    fn detach(&self, id: ListenerId) -> bool {
        self.listeners.lock().remove(id).is_some()
    }
}
