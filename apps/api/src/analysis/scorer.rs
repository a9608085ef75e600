//! Legitimacy scorer — fixed deductions from 1.0, one warning per deduction.
//!
//! Deductions are applied in a fixed order so the warning list reads the same
//! way every time:
//! 1. domain not verified → -0.5
//! 2. verified domain registered < 90 days ago → -0.1
//! 3. no company name → -0.3
//! 4. each suspicious pattern present → -0.2, plus one summary line
//!
//! The running score may go negative; only the final value is clamped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::catalog::{PatternCatalog, Severity};
use crate::analysis::models::{IdentityInfo, RegistrationDate};

const UNVERIFIED_PENALTY: f64 = 0.5;
const NEW_DOMAIN_PENALTY: f64 = 0.1;
const MISSING_NAME_PENALTY: f64 = 0.3;
const SUSPICIOUS_PATTERN_PENALTY: f64 = 0.2;
const NEW_DOMAIN_MAX_AGE_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegitimacyAssessment {
    /// Always within [0.0, 1.0].
    pub score: f64,
    pub warnings: Vec<String>,
}

/// Scores `text` and its extracted identity as of `now`.
pub fn score(
    text: &str,
    identity: &IdentityInfo,
    catalog: &PatternCatalog,
    now: DateTime<Utc>,
) -> LegitimacyAssessment {
    let mut score = 1.0_f64;
    let mut warnings = Vec::new();

    if !identity.verified {
        score -= UNVERIFIED_PENALTY;
        warnings.push(
            "Company domain could not be verified or does not exist (-50% score)".to_string(),
        );
    } else {
        match &identity.registration_date {
            Some(RegistrationDate::Timestamp(registered_at)) => {
                let age_days = (now - *registered_at).num_days();
                if age_days < NEW_DOMAIN_MAX_AGE_DAYS {
                    score -= NEW_DOMAIN_PENALTY;
                    warnings.push(
                        "Company domain is relatively new (< 90 days old) (-10% score)"
                            .to_string(),
                    );
                }
            }
            Some(RegistrationDate::Unparsed(_)) => {
                warnings.push("Could not determine domain registration date format.".to_string());
            }
            None => {
                warnings
                    .push("Domain registration date not found, skipping age check.".to_string());
            }
        }
    }

    if identity.name.is_none() {
        score -= MISSING_NAME_PENALTY;
        warnings.push("Company name could not be detected in the text (-30% score)".to_string());
    }

    let mut suspicious_hits = 0_u32;
    for pattern in catalog.suspicious() {
        if !pattern.is_match(text) {
            continue;
        }
        score -= SUSPICIOUS_PATTERN_PENALTY;
        suspicious_hits += 1;
        warnings.push(match pattern.severity {
            Severity::Critical => format!(
                "Critical Warning: Suspicious pattern '{}' detected (potential scam indicator) (-20% score)",
                pattern.label
            ),
            Severity::Standard => {
                format!("Suspicious pattern '{}' detected (-20% score)", pattern.label)
            }
        });
    }

    if suspicious_hits > 0 {
        warnings.push(format!(
            "Total score reduction from {suspicious_hits} suspicious patterns: -{}%",
            suspicious_hits * 20
        ));
    }

    LegitimacyAssessment {
        score: score.clamp(0.0, 1.0),
        warnings,
    }
}
