//! Identity extractor — claimed employer name and contact email domain.
//!
//! Only the first match of each pattern in document order is used. The two
//! extractions are independent: either, both or neither may succeed.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::analysis::models::IdentityInfo;
use crate::analysis::registry::{LookupFailure, RegistryVerifier};

static COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:from|at|with)\s+([A-Z][A-Za-z0-9\s&]+(?:Inc\.|LLC|Ltd\.|Limited|Corp\.)?)")
        .expect("company name regex")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@([\w.-]+)").expect("email regex"));

/// Name and domain as they appear in the text, before any registry lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedIdentity {
    pub name: Option<String>,
    pub domain: Option<String>,
}

pub fn extract_identity(text: &str) -> ExtractedIdentity {
    ExtractedIdentity {
        name: extract_company_name(text),
        domain: extract_email_domain(text),
    }
}

fn extract_company_name(text: &str) -> Option<String> {
    let caps = COMPANY_RE.captures(text)?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn extract_email_domain(text: &str) -> Option<String> {
    let caps = EMAIL_RE.captures(text)?;
    let domain = caps.get(1)?.as_str().trim_end_matches('.');
    (!domain.is_empty()).then(|| domain.to_string())
}

/// Extracts the identity from `text` and verifies its domain, if any.
pub async fn identify(
    text: &str,
    registry: &dyn RegistryVerifier,
    timeout: Duration,
) -> IdentityInfo {
    let extracted = extract_identity(text);
    verify_identity(extracted, registry, timeout).await
}

/// Runs the registry lookup for an extracted identity.
///
/// Never fails: a lookup error, a timeout or a non-affirmative record all
/// leave the identity unverified. Without a domain the registry is not called.
pub async fn verify_identity(
    extracted: ExtractedIdentity,
    registry: &dyn RegistryVerifier,
    timeout: Duration,
) -> IdentityInfo {
    let mut info = IdentityInfo {
        name: extracted.name,
        domain: extracted.domain,
        verified: false,
        registration_date: None,
    };

    let Some(domain) = info.domain.clone() else {
        return info;
    };

    let outcome = match tokio::time::timeout(timeout, registry.lookup(&domain)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(LookupFailure::Timeout(timeout)),
    };

    match outcome {
        Ok(record) if record.registered => {
            debug!("Registry confirmed domain {domain}");
            info.verified = true;
            info.registration_date = record.registration_dates.into_iter().next();
        }
        Ok(_) => debug!("Registry has no registration for {domain}"),
        Err(e) => warn!("Registry lookup for {domain} failed: {e}"),
    }

    info
}
