//! Key token normalization.
//!
//! Host input surfaces report keys as raw string identities: `"k"`, `" "`,
//! `"Meta"`, `"ArrowUp"`. Chord matching works on canonical tokens so that
//! Shift-driven case does not split one physical key into two identities and
//! so that the space character has a printable name.

use std::fmt;

/// Named non-printable keys that normalize to their canonical name.
const NAMED_KEYS: &[&str] = &[
    // Modifiers
    "Meta",
    "Control",
    "Shift",
    "Alt",
    // Editing and control
    "Enter",
    "Escape",
    "Backspace",
    "Delete",
    "Tab",
    // Navigation
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
];

/// A normalized key token used for chord matching.
///
/// Tokens compare by their canonical text. Construct them through
/// [`KeyToken::normalize`] so that equivalent raw identities collapse to the
/// same token (`"k"` and `"K"` are the same chord member).
///
/// Anything outside the normalization table passes through unchanged, so
/// hosts with richer key vocabularies (function keys, media keys) still get
/// stable, matchable tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken(String);

impl KeyToken {
    /// Normalize a raw host key identity into a canonical token.
    ///
    /// - Modifier keys (`Meta`, `Control`, `Shift`, `Alt`) map to themselves.
    /// - Named non-printable keys (`Enter`, `Escape`, `Backspace`, `Delete`,
    ///   `Tab`, arrow keys) map to their canonical name.
    /// - The space character maps to the literal token `"Space"`.
    /// - Single printable characters are upper-cased.
    /// - Anything else passes through unchanged.
    pub fn normalize(raw: &str) -> Self {
        if raw == " " {
            return Self("Space".to_owned());
        }
        if NAMED_KEYS.contains(&raw) {
            return Self(raw.to_owned());
        }
        let mut chars = raw.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Self(ch.to_uppercase().collect());
        }
        Self(raw.to_owned())
    }

    /// View the canonical token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this token is one of the four modifier keys.
    pub fn is_modifier(&self) -> bool {
        matches!(self.0.as_str(), "Meta" | "Control" | "Shift" | "Alt")
    }

    /// Check if this token is an arrow key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self.0.as_str(),
            "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
        )
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyToken {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl AsRef<str> for KeyToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
