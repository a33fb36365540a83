//! Category catalog: named categories with keyword sets, loaded from
//! storage and cached as an immutable snapshot.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A named category and the keywords that vote for it.
///
/// Names are unique across the catalog; keyword sets may overlap
/// between categories (the classifier resolves overlaps by score).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDef {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryDef {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

/// Storage seam: anything that can produce the full category list.
pub trait CategorySource {
    fn load_all(&self) -> Result<Vec<CategoryDef>>;
}

/// The fixed default catalog seeded into storage on first run.
pub fn default_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new(
            "food",
            &["lunch", "dinner", "breakfast", "restaurant", "cafe", "food", "meal"],
        ),
        CategoryDef::new(
            "travel",
            &["uber", "taxi", "bus", "train", "flight", "petrol", "fuel", "travel"],
        ),
        CategoryDef::new(
            "fun",
            &["movie", "game", "entertainment", "party", "fun", "leisure"],
        ),
        CategoryDef::new(
            "room_expense",
            &["rent", "electricity", "water", "gas", "maintenance", "utility"],
        ),
        CategoryDef::new(
            "groceries",
            &["grocery", "supermarket", "vegetables", "fruits", "shopping"],
        ),
        CategoryDef::new("gym", &["protein", "gym"]),
    ]
}

/// Immutable catalog snapshot.
///
/// Iteration order is the source's insertion order, which is also the
/// classifier's tie-break order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<CategoryDef>,
}

impl Catalog {
    pub fn new(categories: Vec<CategoryDef>) -> Self {
        Self { categories }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDef> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Cache around the catalog with two states: unloaded, then loaded.
///
/// A reload swaps the whole snapshot in one store; readers clone the
/// `Arc` and never observe a half-updated keyword set. A failed load
/// leaves the previous state (possibly still unloaded) in place.
#[derive(Debug, Default)]
pub struct CatalogCache {
    inner: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// Current snapshot; an empty catalog while nothing is loaded.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.read().unwrap_or_default()
    }

    /// Load from `source` only if nothing has been loaded yet.
    pub fn ensure_loaded(&self, source: &dyn CategorySource) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }
        self.reload(source)
    }

    /// Replace the snapshot with a fresh load, all-or-nothing.
    pub fn reload(&self, source: &dyn CategorySource) -> Result<()> {
        let categories = source.load_all()?;
        let snapshot = Arc::new(Catalog::new(categories));
        // Poisoning cannot corrupt a whole-snapshot swap.
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
        Ok(())
    }

    fn read(&self) -> Option<Arc<Catalog>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct FixedSource(Vec<CategoryDef>);

    impl CategorySource for FixedSource {
        fn load_all(&self) -> Result<Vec<CategoryDef>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl CategorySource for FailingSource {
        fn load_all(&self) -> Result<Vec<CategoryDef>> {
            bail!("storage unreachable")
        }
    }

    #[test]
    fn test_starts_unloaded_with_empty_snapshot() {
        let cache = CatalogCache::new();
        assert!(!cache.is_loaded());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn test_ensure_loaded_transitions_once() {
        let cache = CatalogCache::new();
        let source = FixedSource(default_categories());

        cache.ensure_loaded(&source).unwrap();
        assert!(cache.is_loaded());
        assert_eq!(cache.snapshot().len(), 6);

        // A second ensure with identical content is a no-op.
        let before = cache.snapshot();
        cache.ensure_loaded(&source).unwrap();
        assert_eq!(*cache.snapshot(), *before);
    }

    #[test]
    fn test_failed_load_leaves_previous_state() {
        let cache = CatalogCache::new();
        assert!(cache.ensure_loaded(&FailingSource).is_err());
        assert!(!cache.is_loaded());

        let source = FixedSource(vec![CategoryDef::new("food", &["lunch"])]);
        cache.ensure_loaded(&source).unwrap();

        // Later reload failure keeps the loaded snapshot.
        assert!(cache.reload(&FailingSource).is_err());
        assert!(cache.is_loaded());
        assert_eq!(cache.snapshot().len(), 1);
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let cache = CatalogCache::new();
        cache
            .ensure_loaded(&FixedSource(vec![CategoryDef::new("food", &["lunch"])]))
            .unwrap();

        let held = cache.snapshot();
        cache
            .reload(&FixedSource(vec![
                CategoryDef::new("travel", &["uber"]),
                CategoryDef::new("gym", &["protein"]),
            ]))
            .unwrap();

        // The old snapshot a reader already holds is untouched.
        assert_eq!(held.len(), 1);
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[test]
    fn test_default_catalog_names_are_unique() {
        let defaults = default_categories();
        let mut names: Vec<&str> = defaults.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), defaults.len());
    }
}
