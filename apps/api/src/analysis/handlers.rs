//! Axum route handler for the analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::analysis::models::{AnalysisInput, AnalysisResult, UploadedDocument};
use crate::analysis::pipeline::RESUME_TOO_LARGE;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub success: bool,
    pub analysis: AnalysisResult,
}

/// POST /api/analyze-resume
///
/// Multipart fields: `resume` (PDF file), `role`, `analysisType`, `jobDescription`.
/// Unknown fields are ignored. All validation happens in the pipeline.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let input = read_form(multipart).await?;
    let analysis = state.analyzer.analyze(input).await?;

    Ok(Json(AnalyzeResumeResponse {
        success: true,
        analysis,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalysisInput, AppError> {
    let mut input = AnalysisInput::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let media_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let content = field.bytes().await.map_err(invalid_upload)?;
                debug!(
                    "Received resume upload: {} bytes, type={:?}",
                    content.len(),
                    media_type
                );
                input.document = Some(UploadedDocument {
                    content,
                    media_type,
                    file_name,
                });
            }
            "role" => input.role = Some(field.text().await.map_err(invalid_upload)?),
            "analysisType" => {
                input.analysis_type = Some(field.text().await.map_err(invalid_upload)?)
            }
            "jobDescription" => {
                input.job_description = Some(field.text().await.map_err(invalid_upload)?)
            }
            _ => debug!("Ignoring unexpected form field '{name}'"),
        }
    }

    Ok(input)
}

fn invalid_upload(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(RESUME_TOO_LARGE.to_string());
    }
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}
