use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractionError;
use crate::analysis::response_parser::ParseError;
use crate::llm_client::AiError;

const ANALYSIS_FAILED: &str = "Failed to analyze resume";
const AI_FAILED_MESSAGE: &str =
    "Failed to analyze resume with AI. Please check the server logs for more details.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// This is the only place internal failures become client-visible bodies.
/// Diagnostics are logged by the analysis pipeline, not here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("AI service error: {0}")]
    AiService(#[from] AiError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short label for the failure kind, used in logs and pipeline stage tracking.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Extraction(_) => "extraction",
            AppError::AiService(_) => "ai_service",
            AppError::Parse(_) => "parse",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Extraction(ExtractionError::NoText) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Could not extract text from PDF" }),
            ),
            AppError::Extraction(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": ANALYSIS_FAILED,
                    "message": "Failed to extract text from PDF"
                }),
            ),
            AppError::AiService(_) | AppError::Parse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": ANALYSIS_FAILED, "message": AI_FAILED_MESSAGE }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": ANALYSIS_FAILED,
                    "message": "An internal server error occurred"
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("Role or job description is required".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_extraction_is_bad_request() {
        let response = AppError::Extraction(ExtractionError::NoText).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unreadable_pdf_is_server_error() {
        let response =
            AppError::Extraction(ExtractionError::Unreadable("bad xref".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ai_failure_is_server_error() {
        let response = AppError::AiService(AiError::EmptyContent).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
