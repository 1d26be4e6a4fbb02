//! Shortcut definitions.

use std::fmt;
use std::sync::Arc;

use keychord_core::KeyToken;

/// Outcome of a shortcut handler invocation.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A zero-argument command invoked when its chord completes.
///
/// Handlers are fire-and-forget: the dispatcher never awaits completion, and
/// a handler that returns `Err` or panics is caught at the dispatch boundary
/// and forwarded to the engine's error reporter. Long-running work a handler
/// kicks off is the handler's own responsibility to manage.
pub type ShortcutHandler = Arc<dyn Fn() -> HandlerResult + Send + Sync>;

/// A registered keyboard shortcut.
///
/// The `keys` carry set semantics: order is irrelevant and duplicates are
/// removed at construction. All keys must be simultaneously held, and only
/// those, for the chord to match (exact-set matching, see
/// [`matches`](Self::matches)).
///
/// # Example
///
/// ```
/// use keychord::ShortcutDefinition;
///
/// let def = ShortcutDefinition::new(
///     "palette",
///     ["Meta", "k"],
///     "Open the command palette",
///     || Ok(()),
/// );
///
/// assert_eq!(def.id(), "palette");
/// assert!(def.enabled());
/// // Key tokens are normalized: "k" became "K"
/// assert_eq!(def.keys()[1].as_str(), "K");
/// ```
#[derive(Clone)]
pub struct ShortcutDefinition {
    id: String,
    keys: Vec<KeyToken>,
    description: String,
    handler: ShortcutHandler,
    enabled: bool,
}

impl ShortcutDefinition {
    /// Create an enabled definition.
    ///
    /// Key names are normalized with [`KeyToken::normalize`] and
    /// deduplicated, so `["Meta", "k"]` and `["K", "Meta", "Meta"]` describe
    /// the same chord.
    pub fn new<I, K, F>(
        id: impl Into<String>,
        keys: I,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        F: Fn() -> HandlerResult + Send + Sync + 'static,
    {
        let mut tokens: Vec<KeyToken> = Vec::new();
        for key in keys {
            let token = KeyToken::normalize(key.as_ref());
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Self {
            id: id.into(),
            keys: tokens,
            description: description.into(),
            handler: Arc::new(handler),
            enabled: true,
        }
    }

    /// Builder pattern for the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The unique registry id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The normalized, deduplicated chord members.
    pub fn keys(&self) -> &[KeyToken] {
        &self.keys
    }

    /// Human-readable label, used only by introspection.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this definition can currently match.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// A handle to the command this shortcut runs.
    pub fn handler(&self) -> ShortcutHandler {
        Arc::clone(&self.handler)
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check whether `held` is exactly this chord: same size, same members.
    ///
    /// Exact-set matching means an extra held key suppresses the chord. This
    /// avoids accidental fires while, say, typing with Shift held.
    pub fn matches(&self, held: &[KeyToken]) -> bool {
        self.keys.len() == held.len() && self.keys.iter().all(|key| held.contains(key))
    }
}

impl fmt::Debug for ShortcutDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDefinition")
            .field("id", &self.id)
            .field("keys", &self.keys)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish()
    }
}
