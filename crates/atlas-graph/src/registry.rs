//! Screen registry: one validated-or-not snapshot of the catalog.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use super::{Screen, ScreenId};

/// Immutable snapshot of the loaded screen catalog with O(1) id lookup.
///
/// The registry does not deduplicate or validate; duplicate ids are permitted
/// at this layer and the last occurrence wins on lookup (duplicate detection,
/// if desired, is the loader's responsibility). Cloning is cheap: the screen
/// list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    screens: Arc<Vec<Screen>>,
    index: HashMap<ScreenId, usize>,
}

impl ScreenRegistry {
    /// Build a registry from a loaded snapshot.
    pub fn new(screens: Vec<Screen>) -> Self {
        let mut index = HashMap::default();
        // Forward iteration + insert means later duplicates overwrite earlier
        // ones: last-wins.
        for (position, screen) in screens.iter().enumerate() {
            index.insert(screen.id.clone(), position);
        }

        tracing::debug!(
            "registry built: {} records, {} distinct ids",
            screens.len(),
            index.len()
        );

        Self {
            screens: Arc::new(screens),
            index,
        }
    }

    /// Parse a JSON catalog and wrap it in a registry.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(Self::new(crate::parse_screens(json)?))
    }

    /// Whether a screen with this id exists.
    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Retrieve a screen by id. Last declaration wins for duplicate ids.
    pub fn get(&self, id: &str) -> Option<&Screen> {
        self.index.get(id).map(|&position| &self.screens[position])
    }

    /// The underlying snapshot, in load order (including shadowed duplicates).
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Iterate over the snapshot in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }

    /// Number of records in the snapshot (counting duplicates).
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Screen;

    fn id(s: &str) -> ScreenId {
        ScreenId::new(s).unwrap()
    }

    #[test]
    fn lookup_by_id() {
        let registry = ScreenRegistry::new(vec![
            Screen::builder(id("home"), "Home", "/").build(),
            Screen::builder(id("about"), "About", "/about").build(),
        ]);

        assert!(registry.has("home"));
        assert!(!registry.has("missing"));
        assert_eq!(registry.get("about").unwrap().title, "About");
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn duplicate_ids_last_wins() {
        let registry = ScreenRegistry::new(vec![
            Screen::builder(id("home"), "First", "/").build(),
            Screen::builder(id("home"), "Second", "/v2").build(),
        ]);

        assert_eq!(registry.get("home").unwrap().title, "Second");
        // Both records stay in the snapshot.
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = ScreenRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.get("anything").is_none());
    }
}
