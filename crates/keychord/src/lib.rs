//! Keyboard shortcut registry and dispatcher.
//!
//! `keychord` turns a host's raw key-down/key-up stream into invocations of
//! registered commands. Shortcuts are exact-set chords: `Meta+K` fires when
//! exactly `Meta` and `K` are held, and stays quiet while `Meta+Shift+K` is
//! down. Matching is scanned in registration order and the first enabled
//! match wins, so dispatch stays deterministic when two commands claim the
//! same chord.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use keychord::{ShortcutDefinition, ShortcutEngine, SimulatedInput};
//!
//! let input = Arc::new(SimulatedInput::new());
//! let engine = ShortcutEngine::new(input.clone());
//!
//! engine.register(ShortcutDefinition::new(
//!     "toggle-sidebar",
//!     ["Control", "B"],
//!     "Toggle the sidebar",
//!     || Ok(()),
//! ))?;
//!
//! engine.start();
//! input.press("Control");
//! assert!(input.press("b"));
//! engine.stop();
//! # Ok::<(), keychord::KeychordError>(())
//! ```
//!
//! # Integrating a real host
//!
//! [`SimulatedInput`] exists for tests and examples. A production host
//! implements [`InputSource`] over its native event stream (a window event
//! loop, a terminal reader) and the engine attaches to it through
//! [`ShortcutEngine::start`]. Key identities are normalized by
//! [`KeyToken`](keychord_core::KeyToken), so `" "`, `"s"` and `"S"` all
//! land on the same tokens no matter which layer produced them.
//!
//! Handler failures never unwind through the dispatcher: `Err` returns and
//! panics are routed to an [`ErrorReporter`](keychord_core::ErrorReporter)
//! (by default, a `tracing` error record) and key processing continues.

pub use keychord_core::*;

mod definition;
mod engine;
mod registry;
mod source;

pub use definition::{HandlerResult, ShortcutDefinition, ShortcutHandler};
pub use engine::ShortcutEngine;
pub use registry::ShortcutRegistry;
pub use source::{InputSource, KeyListener, ListenerId, SimulatedInput};
