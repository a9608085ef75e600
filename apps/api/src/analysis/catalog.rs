//! Pattern catalog — the read-only pattern sets shared by the classifier and scorer.
//!
//! Built once at startup and handed out as `Arc<PatternCatalog>`. Nothing mutates it
//! afterwards, so concurrent analyses read it without locking.

use regex::{Regex, RegexBuilder};

use crate::analysis::models::DocumentCategory;

/// Classification patterns, in tie-break order.
const CATEGORY_PATTERNS: &[(DocumentCategory, &[&str])] = &[
    (
        DocumentCategory::OfferLetter,
        &[
            r"offer\s+letter",
            r"employment\s+offer",
            r"job\s+offer",
            r"position\s+offer",
        ],
    ),
    (
        DocumentCategory::InternshipLetter,
        &[
            r"internship\s+letter",
            r"intern\s+offer",
            r"internship\s+program",
        ],
    ),
    (
        DocumentCategory::CallLetter,
        &[
            r"call\s+letter",
            r"interview\s+call",
            r"selection\s+letter",
        ],
    ),
];

/// (label, pattern, severity). Fee, deposit and payment requests are critical.
const SUSPICIOUS_PATTERNS: &[(&str, &str, Severity)] = &[
    ("urgent job offer", r"urgent\s+job\s+offer", Severity::Standard),
    ("immediate joining", r"immediate\s+joining", Severity::Standard),
    (
        "work from home with a quoted dollar amount",
        r"work\s+from\s+home.*\$\d+",
        Severity::Standard,
    ),
    ("payment required", r"payment\s+required", Severity::Critical),
    ("application fee", r"application\s+fee", Severity::Critical),
    ("processing fee", r"processing\s+fee", Severity::Critical),
    ("security deposit", r"security\s+deposit", Severity::Critical),
    ("need to pay", r"need\s+to\s+pay", Severity::Critical),
    (
        "free webmail contact address",
        r"gmail\.com|yahoo\.com|hotmail\.com",
        Severity::Standard,
    ),
];

/// Selects warning wording only; every match costs the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Standard,
}

#[derive(Debug, Clone)]
pub struct CategoryPatterns {
    pub category: DocumentCategory,
    pub patterns: Vec<Regex>,
}

#[derive(Debug, Clone)]
pub struct SuspiciousPattern {
    pub label: &'static str,
    pub pattern: Regex,
    pub severity: Severity,
}

impl SuspiciousPattern {
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    categories: Vec<CategoryPatterns>,
    suspicious: Vec<SuspiciousPattern>,
}

impl PatternCatalog {
    /// Compiles the built-in pattern sets. All patterns match case-insensitively.
    pub fn standard() -> Result<Self, regex::Error> {
        let categories = CATEGORY_PATTERNS
            .iter()
            .map(|(category, sources)| -> Result<CategoryPatterns, regex::Error> {
                let patterns = sources
                    .iter()
                    .map(|s| compile(s))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CategoryPatterns {
                    category: *category,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let suspicious = SUSPICIOUS_PATTERNS
            .iter()
            .map(|(label, source, severity)| -> Result<SuspiciousPattern, regex::Error> {
                Ok(SuspiciousPattern {
                    label: *label,
                    pattern: compile(source)?,
                    severity: *severity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            categories,
            suspicious,
        })
    }

    pub fn categories(&self) -> &[CategoryPatterns] {
        &self.categories
    }

    pub fn suspicious(&self) -> &[SuspiciousPattern] {
        &self.suspicious
    }
}

fn compile(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_compiles() {
        let catalog = PatternCatalog::standard().unwrap();
        assert_eq!(catalog.categories().len(), 3);
        assert_eq!(catalog.suspicious().len(), 9);
    }

    #[test]
    fn test_category_order_is_stable() {
        let catalog = PatternCatalog::standard().unwrap();
        let order: Vec<_> = catalog.categories().iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                DocumentCategory::OfferLetter,
                DocumentCategory::InternshipLetter,
                DocumentCategory::CallLetter,
            ]
        );
    }

    #[test]
    fn test_payment_patterns_are_critical() {
        let catalog = PatternCatalog::standard().unwrap();
        let critical: Vec<_> = catalog
            .suspicious()
            .iter()
            .filter(|p| p.severity == Severity::Critical)
            .map(|p| p.label)
            .collect();
        assert_eq!(
            critical,
            vec![
                "payment required",
                "application fee",
                "processing fee",
                "security deposit",
                "need to pay",
            ]
        );
    }

    #[test]
    fn test_patterns_ignore_case() {
        let catalog = PatternCatalog::standard().unwrap();
        let fee = catalog
            .suspicious()
            .iter()
            .find(|p| p.label == "application fee")
            .unwrap();
        assert!(fee.is_match("An APPLICATION   Fee of $50"));
    }

    #[test]
    fn test_dollar_amount_must_follow_work_from_home_on_same_line() {
        let catalog = PatternCatalog::standard().unwrap();
        let wfh = catalog
            .suspicious()
            .iter()
            .find(|p| p.label.starts_with("work from home"))
            .unwrap();
        assert!(wfh.is_match("Work from home and earn $500 a day"));
        assert!(!wfh.is_match("Work from home\nearn $500 a day"));
        assert!(!wfh.is_match("Work from home opportunities"));
    }
}
