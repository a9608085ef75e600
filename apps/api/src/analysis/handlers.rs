//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;

use crate::analysis::document::DocumentFormat;
use crate::analysis::models::{AnalysisResult, CompanyVerification};
use crate::errors::AppError;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
    // Client-side hint. Accepted for compatibility; classification always runs.
    #[allow(dead_code)]
    pub document_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCompanyQuery {
    pub company_name: String,
    pub domain: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.analyzer.analyze(&request.text).await;
    Ok(Json(result))
}

/// POST /api/analyze/document
///
/// Multipart upload with a single `file` field. Only .pdf, .doc and .docx names
/// are accepted; the payload lives in memory for this request only.
pub async fn handle_analyze_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let format = DocumentFormat::from_file_name(&file_name)
            .ok_or_else(|| AppError::Validation("Invalid file format".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let result = state.analyzer.analyze_document(bytes, format).await?;
        return Ok(Json(result));
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field in upload"
    )))
}

/// POST /api/verify-company?company_name=..&domain=..
pub async fn handle_verify_company(
    State(state): State<AppState>,
    Query(query): Query<VerifyCompanyQuery>,
) -> Result<Json<CompanyVerification>, AppError> {
    if query.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }

    let verification = state
        .analyzer
        .verify_company(&query.company_name, query.domain.as_deref())
        .await;

    Ok(Json(verification))
}
