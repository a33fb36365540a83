//! The extraction pipeline: free text in, structured expense fields out.

use anyhow::{Result, bail};

use crate::amount::AmountRules;
use crate::catalog::{CatalogCache, CategorySource};
use crate::classify::classify;
use crate::describe::Describer;
use crate::expense::Extraction;

/// Composes the amount, category, and description extractors over a
/// lazily loaded category catalog.
///
/// Extraction itself is pure and synchronous; the only shared state is
/// the catalog cache, which concurrent calls read through immutable
/// snapshots.
pub struct Pipeline<'a> {
    amounts: AmountRules,
    describer: Describer,
    catalog: CatalogCache,
    source: &'a dyn CategorySource,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn CategorySource) -> Result<Self> {
        Ok(Self {
            amounts: AmountRules::new()?,
            describer: Describer::new()?,
            catalog: CatalogCache::new(),
            source,
        })
    }

    /// Load the catalog now instead of on the first extraction, so the
    /// caller can observe a storage failure.
    pub fn warm_catalog(&self) -> Result<()> {
        self.catalog.ensure_loaded(self.source)
    }

    /// Extract `(amount, category, description)` from one prompt.
    ///
    /// Fails only when no positive amount can be found; the caller
    /// rejects the submission and persists nothing.
    pub fn extract(&self, prompt: &str) -> Result<Extraction> {
        // A failed load keeps the previous (possibly empty) snapshot,
        // under which everything classifies as miscellaneous; the
        // failure stays observable through warm_catalog().
        let _ = self.catalog.ensure_loaded(self.source);

        let amount = self.amounts.extract(prompt);
        if amount <= 0.0 {
            bail!("could not extract a valid amount from prompt");
        }

        let snapshot = self.catalog.snapshot();
        let category = classify(prompt, &snapshot);
        let description = self.describer.describe(prompt, &category);

        Ok(Extraction {
            amount,
            category,
            description,
        })
    }
}
