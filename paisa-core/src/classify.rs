//! Keyword-presence category classifier.

use crate::catalog::Catalog;
use crate::expense::MISCELLANEOUS;

/// Score `text` against every category in `catalog` and pick the best.
///
/// A category's score is the number of its keywords present in the text
/// as case-insensitive substrings; each keyword contributes at most 1
/// however often it occurs. A zero best score, or an empty catalog,
/// yields the "miscellaneous" sentinel.
///
/// Tie-break contract: equal nonzero scores go to the category that
/// appears first in catalog iteration order (the storage insertion
/// order). The strict `>` below keeps the first-seen winner.
pub fn classify(text: &str, catalog: &Catalog) -> String {
    let text = text.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for category in catalog.iter() {
        let score = category
            .keywords
            .iter()
            .filter(|kw| text.contains(kw.to_lowercase().as_str()))
            .count();
        if score > 0 && best.is_none_or(|(_, s)| score > s) {
            best = Some((category.name.as_str(), score));
        }
    }

    match best {
        Some((name, _)) => name.to_string(),
        None => MISCELLANEOUS.to_string(),
    }
}
