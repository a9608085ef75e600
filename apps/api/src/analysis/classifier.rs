//! Document classifier — picks the category whose patterns are best supported by the text.

use crate::analysis::catalog::PatternCatalog;
use crate::analysis::models::DocumentCategory;

/// Counts, per category, how many distinct patterns match at least once.
/// The strictly highest count wins; ties keep the earlier category; no matches
/// at all fall back to `OfferLetter`.
pub fn classify(text: &str, catalog: &PatternCatalog) -> DocumentCategory {
    let text = text.to_lowercase();

    let mut best = DocumentCategory::default();
    let mut best_matches = 0_usize;

    for entry in catalog.categories() {
        let matches = entry.patterns.iter().filter(|p| p.is_match(&text)).count();
        if matches > best_matches {
            best_matches = matches;
            best = entry.category;
        }
    }

    best
}
