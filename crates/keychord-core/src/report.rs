//! Handler failure reporting.
//!
//! Shortcut handlers run detached from the dispatch path: a handler that
//! returns an error or panics must not interrupt key processing, and must
//! not disable the shortcut that produced it. The dispatcher catches such
//! failures at its boundary and forwards them to an [`ErrorReporter`]
//! supplied by the embedding application.

use std::any::Any;
use std::error::Error;
use std::fmt;

/// Collaborator that receives handler failures from the dispatch boundary.
///
/// The default implementation is [`TracingReporter`]; applications with
/// their own error pipeline (crash reporting, toasts) inject a custom one.
pub trait ErrorReporter: Send + Sync {
    /// Report a failure produced by the handler of the given shortcut.
    fn report(&self, shortcut_id: &str, error: &dyn Error);
}

/// Default reporter that logs failures through `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, shortcut_id: &str, error: &dyn Error) {
        tracing::error!(
            target: crate::logging::targets::DISPATCH,
            shortcut_id,
            %error,
            "shortcut handler failed"
        );
    }
}

/// Error produced when a shortcut handler panics.
///
/// The panic payload is recovered into a printable message so reporters see
/// panics and `Err` returns through the same interface.
#[derive(Debug)]
pub struct HandlerPanic {
    message: String,
}

impl HandlerPanic {
    /// Recover a printable message from a panic payload.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        Self { message }
    }

    /// The recovered panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler panicked: {}", self.message)
    }
}

impl std::error::Error for HandlerPanic {}
