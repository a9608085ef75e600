//! Analysis orchestrator — classify, identify, score, assemble.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::catalog::PatternCatalog;
use crate::analysis::classifier::classify;
use crate::analysis::document::{DocumentFormat, DocumentProcessingError, TextExtractor};
use crate::analysis::extractor::{extract_identity, identify, verify_identity};
use crate::analysis::models::{AnalysisResult, CompanyVerification};
use crate::analysis::registry::RegistryVerifier;
use crate::analysis::scorer::score;

/// Entry point used by the route handlers. Cheap to share behind `Arc`.
pub struct DocumentAnalyzer {
    catalog: Arc<PatternCatalog>,
    registry: Arc<dyn RegistryVerifier>,
    extractor: Arc<dyn TextExtractor>,
    lookup_timeout: Duration,
}

impl DocumentAnalyzer {
    pub fn new(
        catalog: Arc<PatternCatalog>,
        registry: Arc<dyn RegistryVerifier>,
        extractor: Arc<dyn TextExtractor>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            registry,
            extractor,
            lookup_timeout,
        }
    }

    /// Runs the full pipeline on plain text. Never fails.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let id = Uuid::new_v4();

        let document_type = classify(text, &self.catalog);
        let company_info = identify(text, self.registry.as_ref(), self.lookup_timeout).await;
        let assessment = score(text, &company_info, &self.catalog, Utc::now());

        let result = AnalysisResult::new(
            id,
            document_type,
            assessment.score,
            company_info,
            assessment.warnings,
        );

        info!(
            "Analysis {id}: type={} score={:.2} legitimate={} warnings={}",
            result.document_type.as_str(),
            result.legitimacy_score,
            result.is_legitimate,
            result.warnings.len()
        );

        result
    }

    /// Extracts the document's text and analyzes it. Extraction failure aborts
    /// the analysis; partial text is never scored.
    pub async fn analyze_document(
        &self,
        bytes: Bytes,
        format: DocumentFormat,
    ) -> Result<AnalysisResult, DocumentProcessingError> {
        let text = self
            .extractor
            .extract(bytes, format)
            .await
            .inspect_err(|e| warn!("Text extraction from .{format} document failed: {e}"))?;

        Ok(self.analyze(&text).await)
    }

    /// Verifies a company on its own, outside a document analysis.
    ///
    /// Runs identity extraction over `"Company: <name>"`. A caller-supplied domain
    /// is looked up when that text yields none.
    pub async fn verify_company(
        &self,
        company_name: &str,
        domain: Option<&str>,
    ) -> CompanyVerification {
        let mut extracted = extract_identity(&format!("Company: {company_name}"));
        if extracted.domain.is_none() {
            extracted.domain = domain
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string);
        }

        let company_info =
            verify_identity(extracted, self.registry.as_ref(), self.lookup_timeout).await;

        CompanyVerification {
            verified: company_info.verified,
            company_info,
        }
    }
}
