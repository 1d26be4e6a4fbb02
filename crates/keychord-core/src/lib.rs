//! Core types for Keychord.
//!
//! This crate provides the foundational pieces of the Keychord shortcut
//! engine, with no knowledge of registries or dispatch:
//!
//! - **Key Normalization**: [`KeyToken`] maps raw host key identities to
//!   canonical tokens used for chord matching
//! - **Key Events**: [`KeyPressEvent`] / [`KeyReleaseEvent`] with an
//!   accept flag that suppresses default host handling
//! - **Failure Reporting**: the [`ErrorReporter`] collaborator that receives
//!   handler failures from the dispatch boundary
//! - **Logging**: `tracing` target names for filtering, in [`logging`]
//!
//! # Normalization Example
//!
//! ```
//! use keychord_core::KeyToken;
//!
//! // Shift-driven case collapses to one token
//! assert_eq!(KeyToken::normalize("k"), KeyToken::normalize("K"));
//!
//! // The space character gets a printable name
//! assert_eq!(KeyToken::normalize(" ").as_str(), "Space");
//!
//! // Named keys map to themselves
//! assert_eq!(KeyToken::normalize("Escape").as_str(), "Escape");
//! ```
//!
//! # Event Example
//!
//! ```
//! use keychord_core::KeyPressEvent;
//!
//! let mut event = KeyPressEvent::new("k", false);
//! assert!(!event.base.is_accepted());
//!
//! // Accepting the event tells the host to suppress its default handling
//! event.base.accept();
//! assert!(event.base.is_accepted());
//! ```

mod error;
mod event;
mod key;
pub mod logging;
mod report;

pub use error::{KeychordError, Result};
pub use event::{EventBase, KeyPressEvent, KeyReleaseEvent};
pub use key::KeyToken;
pub use report::{ErrorReporter, HandlerPanic, TracingReporter};
