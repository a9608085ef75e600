pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/analyze/text", post(handlers::handle_analyze_text))
        .route(
            "/api/analyze/document",
            post(handlers::handle_analyze_document),
        )
        .route(
            "/api/verify-company",
            post(handlers::handle_verify_company),
        )
        // Report generation is out of scope for this service
        .route(
            "/api/generate-report/:analysis_id",
            post(not_implemented),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
