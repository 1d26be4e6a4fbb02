//! The shortcut registry: CRUD over definitions, no knowledge of key events.

use keychord_core::logging::targets;
use keychord_core::{KeychordError, Result};

use crate::definition::ShortcutDefinition;

/// Ordered collection of shortcut definitions.
///
/// Insertion order is preserved and is the dispatch tie-break: when two
/// enabled definitions share a chord, the first registered wins. Replacing a
/// definition by id keeps its original position, so re-registering never
/// changes the tie-break outcome. Callers who need a different ordering
/// unregister and re-register in the desired order.
///
/// Duplicate chords across distinct ids are legal; they are resolved at
/// dispatch time, not at registration.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: Vec<ShortcutDefinition>,
}

impl ShortcutRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a definition by id (last write wins).
    ///
    /// The only validation is that the chord is non-empty; an empty chord
    /// could never match and is rejected with [`KeychordError::EmptyChord`].
    pub fn register(&mut self, def: ShortcutDefinition) -> Result<()> {
        if def.keys().is_empty() {
            return Err(KeychordError::EmptyChord {
                id: def.id().to_owned(),
            });
        }

        match self.entries.iter_mut().find(|entry| entry.id() == def.id()) {
            Some(slot) => {
                tracing::debug!(target: targets::REGISTRY, id = def.id(), "replaced shortcut");
                *slot = def;
            }
            None => {
                tracing::debug!(target: targets::REGISTRY, id = def.id(), "registered shortcut");
                self.entries.push(def);
            }
        }
        Ok(())
    }

    /// Remove a definition by id. No-op if absent.
    pub fn unregister(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        if self.entries.len() != before {
            tracing::debug!(target: targets::REGISTRY, id, "unregistered shortcut");
        }
    }

    /// Allow a definition to match again. No-op if absent.
    pub fn enable(&mut self, id: &str) {
        self.set_enabled(id, true);
    }

    /// Keep a definition registered but prevent it from matching.
    /// No-op if absent.
    pub fn disable(&mut self, id: &str) {
        self.set_enabled(id, false);
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id() == id) {
            entry.set_enabled(enabled);
            tracing::debug!(target: targets::REGISTRY, id, enabled, "toggled shortcut");
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Snapshot of all definitions in registration order.
    pub fn snapshot(&self) -> Vec<ShortcutDefinition> {
        self.entries.to_vec()
    }

    /// Iterate definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShortcutDefinition> {
        self.entries.iter()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every definition.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
