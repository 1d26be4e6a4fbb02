//! Error types for Keychord.
//!
//! Registration is deliberately forgiving: `unregister`, `enable`, and
//! `disable` on an unknown id are silent no-ops, not failures. The only
//! rejected operation is registering a shortcut with an empty key set, which
//! could never match anything.

use std::fmt;

/// The main error type for Keychord operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeychordError {
    /// A shortcut was registered with an empty key set.
    EmptyChord {
        /// The id of the rejected registration.
        id: String,
    },
}

impl fmt::Display for KeychordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyChord { id } => {
                write!(f, "shortcut '{id}' has an empty key set and can never match")
            }
        }
    }
}

impl std::error::Error for KeychordError {}

/// A specialized Result type for Keychord operations.
pub type Result<T> = std::result::Result<T, KeychordError>;
