//! The shortcut dispatch engine.
//!
//! Two cooperating layers behind one type:
//!
//! - **Registry**: all known shortcuts (id → definition), independent of
//!   whether the engine is listening. Pure data plus CRUD.
//! - **Dispatcher**: owns the held-key set, subscribes to the host's
//!   key-down/key-up stream, normalizes key identities, and on every
//!   key-down evaluates the registry against the held keys, invoking at most
//!   one matching handler per physical key-down.
//!
//! Control flow: host key-down → normalize → add to held set → scan registry
//! in registration order → first exact-set match wins → accept the event
//! (suppress host default) and invoke the handler, isolated from failures.
//! Key-up only removes from the held set; it never dispatches.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use keychord_core::logging::targets;
use keychord_core::{
    ErrorReporter, HandlerPanic, KeyPressEvent, KeyReleaseEvent, KeyToken, Result, TracingReporter,
};
use parking_lot::Mutex;
use static_assertions::assert_impl_all;

use crate::definition::ShortcutDefinition;
use crate::registry::ShortcutRegistry;
use crate::source::{InputSource, KeyListener, ListenerId};

/// The set of physical keys currently held, as normalized tokens.
///
/// Vec-backed: chords are a handful of keys at most. Insert is idempotent so
/// OS auto-repeat key-downs never double-count a key; the match test is a
/// set-equality test, not a counting test.
#[derive(Debug, Default)]
struct HeldKeys {
    pressed: Vec<KeyToken>,
}

impl HeldKeys {
    fn press(&mut self, token: KeyToken) {
        if !self.pressed.contains(&token) {
            self.pressed.push(token);
        }
    }

    fn release(&mut self, token: &KeyToken) {
        self.pressed.retain(|held| held != token);
    }

    fn clear(&mut self) {
        self.pressed.clear();
    }

    fn tokens(&self) -> &[KeyToken] {
        &self.pressed
    }
}

/// Mutable engine state, guarded by one lock.
struct EngineState {
    registry: ShortcutRegistry,
    held: HeldKeys,
    /// `Some` while the dispatcher is in the Listening state.
    listener: Option<ListenerId>,
}

/// Process-wide keyboard shortcut engine.
///
/// One engine instance owns the shortcut registry and the dispatcher state
/// machine. Construct it over the host's [`InputSource`], register
/// definitions, and call [`start`](Self::start) to begin listening:
///
/// ```
/// use std::sync::Arc;
/// use keychord::{ShortcutDefinition, ShortcutEngine, SimulatedInput};
///
/// let input = Arc::new(SimulatedInput::new());
/// let engine = ShortcutEngine::new(input.clone());
///
/// engine.register(ShortcutDefinition::new(
///     "create",
///     ["Meta", "K"],
///     "Create a new task",
///     || Ok(()),
/// ))?;
///
/// engine.start();
/// input.press("Meta");
/// assert!(input.press("k")); // handler fired, default suppressed
/// # Ok::<(), keychord::KeychordError>(())
/// ```
///
/// # Lifecycle
///
/// `start` and `stop` are both idempotent. `stop` detaches from the input
/// source and clears the held-key set, so a later `start` begins clean.
/// Exactly one engine should be attached to a given input source at a time;
/// two listening engines double-fire matched handlers. Sources hold
/// listeners weakly, so a dropped engine does not leak, but call `stop`
/// before discarding one rather than relying on the source to notice it is
/// gone.
///
/// # Stuck keys
///
/// A lost key-up (focus left the window mid-chord) leaves its key marked as
/// held until the engine is told otherwise. This is an environmental
/// limitation, not a dispatcher bug: call [`clear`](Self::clear) on
/// window-blur if strict correctness under focus loss is required.
pub struct ShortcutEngine {
    source: Arc<dyn InputSource>,
    reporter: Arc<dyn ErrorReporter>,
    state: Mutex<EngineState>,
}

assert_impl_all!(ShortcutEngine: Send, Sync);

impl ShortcutEngine {
    /// Create an engine over the given input source with the default
    /// tracing-backed failure reporter.
    pub fn new(source: Arc<dyn InputSource>) -> Arc<Self> {
        Self::with_reporter(source, Arc::new(TracingReporter))
    }

    /// Create an engine with a custom handler-failure reporter.
    pub fn with_reporter(
        source: Arc<dyn InputSource>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            reporter,
            state: Mutex::new(EngineState {
                registry: ShortcutRegistry::new(),
                held: HeldKeys::default(),
                listener: None,
            }),
        })
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Attach to the input source and begin dispatching.
    ///
    /// No-op if already listening. Held keys are assumed empty at entry;
    /// call [`clear`](Self::clear) first if unsure about stale state.
    pub fn start(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if state.listener.is_some() {
            return;
        }
        let listener: Arc<dyn KeyListener> = self.clone();
        state.listener = Some(self.source.attach(listener));
        tracing::debug!(target: targets::LIFECYCLE, "engine listening");
    }

    /// Detach from the input source and clear the held-key set.
    ///
    /// No-op if not listening. Stale "still held" state never leaks into a
    /// subsequent [`start`](Self::start).
    pub fn stop(&self) {
        let id = {
            let mut state = self.state.lock();
            let Some(id) = state.listener.take() else {
                return;
            };
            state.held.clear();
            id
        };
        // Detach outside the state lock: a source implementation may hold
        // its own lock while delivering events.
        self.source.detach(id);
        tracing::debug!(target: targets::LIFECYCLE, "engine stopped");
    }

    /// Whether the dispatcher is currently attached to the input source.
    pub fn is_listening(&self) -> bool {
        self.state.lock().listener.is_some()
    }

    /// Empty the registry and the held-key set.
    ///
    /// Teardown and test hygiene; also the documented mitigation for stuck
    /// keys after focus loss. Listening state is unaffected.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.registry.clear();
        state.held.clear();
    }

    // ------------------------------------------------------------------
    // Registry surface
    // ------------------------------------------------------------------

    /// Insert or replace a shortcut by id (last write wins).
    ///
    /// Rejects only an empty chord. Duplicate chords across distinct ids are
    /// legal and resolved at dispatch time: first registered wins.
    pub fn register(&self, def: ShortcutDefinition) -> Result<()> {
        self.state.lock().registry.register(def)
    }

    /// Remove a shortcut by id. Silent no-op if absent.
    pub fn unregister(&self, id: &str) {
        self.state.lock().registry.unregister(id);
    }

    /// Allow a shortcut to match again. Silent no-op if absent.
    pub fn enable(&self, id: &str) {
        self.state.lock().registry.enable(id);
    }

    /// Keep a shortcut registered but prevent it from matching.
    /// Silent no-op if absent.
    pub fn disable(&self, id: &str) {
        self.state.lock().registry.disable(id);
    }

    /// Snapshot of one definition, or `None` if absent.
    pub fn get(&self, id: &str) -> Option<ShortcutDefinition> {
        self.state.lock().registry.get(id).cloned()
    }

    /// Snapshot of all definitions in registration order.
    ///
    /// Read-only and safe to call from a rendering layer to build a help
    /// listing; reflects registrations made up to the call time.
    pub fn get_all(&self) -> Vec<ShortcutDefinition> {
        self.state.lock().registry.snapshot()
    }

    /// Snapshot of the held-key set, for diagnostics.
    pub fn held_keys(&self) -> Vec<KeyToken> {
        self.state.lock().held.tokens().to_vec()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Run one matched handler, isolated from the dispatch path.
    ///
    /// `Err` returns and panics are forwarded to the reporter; they never
    /// disable the shortcut or interrupt subsequent key processing.
    fn invoke(&self, def: &ShortcutDefinition) {
        tracing::debug!(target: targets::DISPATCH, id = def.id(), "chord matched");
        let handler = def.handler();
        match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => self.reporter.report(def.id(), error.as_ref()),
            Err(payload) => {
                let error = HandlerPanic::from_payload(payload);
                self.reporter.report(def.id(), &error);
            }
        }
    }
}

impl KeyListener for ShortcutEngine {
    fn key_pressed(&self, event: &mut KeyPressEvent) {
        let token = KeyToken::normalize(&event.key);
        let matched = {
            let mut state = self.state.lock();
            state.held.press(token);
            state
                .registry
                .iter()
                .find(|def| def.enabled() && def.matches(state.held.tokens()))
                .cloned()
        };
        // The lock is released before the handler runs: a slow handler must
        // not stall key processing on a host that delivers concurrently.
        match matched {
            Some(def) => {
                event.base.accept();
                self.invoke(&def);
            }
            None => {
                tracing::trace!(target: targets::DISPATCH, key = %event.key, "no chord match");
            }
        }
    }

    fn key_released(&self, event: &mut KeyReleaseEvent) {
        let token = KeyToken::normalize(&event.key);
        self.state.lock().held.release(&token);
    }
}
