use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of hiring document. Catalog order is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    #[default]
    OfferLetter,
    InternshipLetter,
    CallLetter,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::OfferLetter => "offer_letter",
            DocumentCategory::InternshipLetter => "internship_letter",
            DocumentCategory::CallLetter => "call_letter",
        }
    }
}

/// Registration date as reported by the registry.
///
/// Registries are loose about date formats, so a value that does not parse
/// is kept verbatim instead of being discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrationDate {
    Timestamp(DateTime<Utc>),
    Unparsed(String),
}

impl RegistrationDate {
    /// Parses an RFC 3339 value, falling back to the raw text.
    pub fn parse(raw: &str) -> Self {
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(ts) => RegistrationDate::Timestamp(ts.with_timezone(&Utc)),
            Err(_) => RegistrationDate::Unparsed(raw.to_string()),
        }
    }
}

/// Claimed employer identity plus the registry's verdict on its domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityInfo {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub verified: bool,
    pub registration_date: Option<RegistrationDate>,
}

/// Final record returned for every analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub document_type: DocumentCategory,
    pub legitimacy_score: f64,
    pub is_legitimate: bool,
    /// Mirrors `legitimacy_score`; see DESIGN.md.
    pub confidence_score: f64,
    pub company_info: IdentityInfo,
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    /// Builds the record, deriving the verdict and confidence from the score.
    pub fn new(
        id: Uuid,
        document_type: DocumentCategory,
        legitimacy_score: f64,
        company_info: IdentityInfo,
        warnings: Vec<String>,
    ) -> Self {
        let legitimacy_score = legitimacy_score.clamp(0.0, 1.0);
        Self {
            id,
            document_type,
            legitimacy_score,
            is_legitimate: legitimacy_score > LEGITIMACY_THRESHOLD,
            confidence_score: legitimacy_score,
            company_info,
            warnings,
        }
    }
}

/// Scores strictly above this are reported as legitimate.
pub const LEGITIMACY_THRESHOLD: f64 = 0.5;

/// Output of the standalone company verification entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyVerification {
    pub verified: bool,
    pub company_info: IdentityInfo,
}
