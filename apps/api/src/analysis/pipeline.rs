//! Analysis pipeline — orchestrates one resume analysis end to end.
//!
//! Flow: validate → extract text → build prompt → AI call → parse reply.
//!
//! Stages run strictly in order and any failure aborts the request. Exactly one
//! AI call is made per successful validation+extraction; nothing is retried,
//! cached or shared between requests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use crate::analysis::extractor::extract_text;
use crate::analysis::models::{
    AnalysisInput, AnalysisMode, AnalysisRequest, AnalysisResult, UploadedDocument,
};
use crate::analysis::prompts::build_prompt;
use crate::analysis::response_parser::parse_analysis;
use crate::errors::AppError;
use crate::llm_client::{AiError, AiService};

/// Largest resume accepted, in bytes.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub const RESUME_TOO_LARGE: &str = "Resume file exceeds the 10MB limit";

/// Per-request pipeline state. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Extracted,
    /// Prompt built and handed to the AI service. Building cannot fail, so
    /// there is no separate "prompted" resting state.
    AwaitingAi,
    Parsed,
    Completed,
    Failed(&'static str),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Received => f.write_str("received"),
            Stage::Validated => f.write_str("validated"),
            Stage::Extracted => f.write_str("extracted"),
            Stage::AwaitingAi => f.write_str("awaiting_ai"),
            Stage::Parsed => f.write_str("parsed"),
            Stage::Completed => f.write_str("completed"),
            Stage::Failed(kind) => write!(f, "failed({kind})"),
        }
    }
}

/// Inputs that passed validation, before extraction.
#[derive(Debug)]
struct ValidatedInput {
    document: UploadedDocument,
    role: Option<String>,
    job_description: Option<String>,
    mode: AnalysisMode,
}

/// The orchestrator. Holds the AI capability it was given; no other state.
#[derive(Clone)]
pub struct Analyzer {
    ai: Arc<dyn AiService>,
    ai_timeout: Duration,
}

impl Analyzer {
    pub fn new(ai: Arc<dyn AiService>, ai_timeout: Duration) -> Self {
        Self { ai, ai_timeout }
    }

    /// Runs the full pipeline for one request.
    pub async fn analyze(&self, input: AnalysisInput) -> Result<AnalysisResult, AppError> {
        let span = tracing::info_span!("analysis", request_id = %Uuid::new_v4());
        async move {
            let mut stage = Stage::Received;
            debug!("stage: {stage}");

            let outcome = self.run(input, &mut stage).await;
            match &outcome {
                Ok(result) => {
                    advance(&mut stage, Stage::Completed);
                    log_completed(result);
                }
                Err(e) => {
                    let failed_at = stage;
                    advance(&mut stage, Stage::Failed(e.kind()));
                    log_failed(failed_at, e);
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        input: AnalysisInput,
        stage: &mut Stage,
    ) -> Result<AnalysisResult, AppError> {
        let validated = validate(input)?;
        advance(stage, Stage::Validated);

        let document = validated.document;
        let extracted_text = tokio::task::spawn_blocking(move || extract_text(&document.content))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;
        advance(stage, Stage::Extracted);
        debug!("Extracted {} characters of resume text", extracted_text.len());

        let request = AnalysisRequest {
            extracted_text,
            role: validated.role,
            job_description: validated.job_description,
            mode: validated.mode,
        };
        let prompt = build_prompt(&request);
        advance(stage, Stage::AwaitingAi);
        debug!("Sending {} character {} prompt", prompt.len(), request.mode);
        let reply = tokio::time::timeout(self.ai_timeout, self.ai.generate(&prompt))
            .await
            .map_err(|_| AiError::Timeout(self.ai_timeout))??;

        let result = parse_analysis(&reply)?;
        advance(stage, Stage::Parsed);

        Ok(result)
    }
}

fn log_completed(result: &AnalysisResult) {
    let missing = result.missing_dimensions();
    if !missing.is_empty() {
        warn!("AI reply omitted sub-scores: {}", missing.join(", "));
    }
    debug!(
        strengths = list_len(result.strengths()),
        improvements = list_len(result.improvements()),
        missing_keywords = list_len(result.missing_keywords()),
        ats_improvements = list_len(result.ats_improvements()),
        formatting_tips = list_len(result.formatting_tips()),
        sections = result.section_analysis().map_or(0, |s| s.len()),
        has_summary = result.analysis().is_some(),
        "AI reply sections"
    );
    info!("Analysis completed: overall_score={}", result.overall_score);
}

fn list_len(items: Option<Vec<&str>>) -> usize {
    items.map_or(0, |items| items.len())
}

/// The single log line for a failed request, with the server-side diagnostics
/// the client body leaves out.
fn log_failed(failed_at: Stage, e: &AppError) {
    match e {
        AppError::Validation(msg) => warn!("Analysis rejected after {failed_at}: {msg}"),
        AppError::Parse(parse) => error!(
            raw_reply = %parse.raw_reply,
            "Analysis failed after {failed_at}: {e}"
        ),
        AppError::Internal(inner) => error!("Analysis failed after {failed_at}: {inner:?}"),
        _ => error!("Analysis failed after {failed_at}: {e}"),
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    *stage = next;
    debug!("stage: {next}");
}

/// Treats missing and whitespace-only form values alike.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate(input: AnalysisInput) -> Result<ValidatedInput, AppError> {
    let document = input
        .document
        .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;

    let role = non_blank(input.role);
    let job_description = non_blank(input.job_description);
    if role.is_none() && job_description.is_none() {
        return Err(AppError::Validation(
            "Role or job description is required".to_string(),
        ));
    }

    let analysis_type = non_blank(input.analysis_type)
        .ok_or_else(|| AppError::Validation("Analysis type is required".to_string()))?;
    if !AnalysisMode::is_known(&analysis_type) {
        warn!("Unknown analysis type '{analysis_type}', using optimization");
    }
    let mode = AnalysisMode::from_param(&analysis_type);

    if !document.is_pdf() {
        return Err(AppError::Validation(
            "Only PDF resumes are supported".to_string(),
        ));
    }
    if document.byte_len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(RESUME_TOO_LARGE.to_string()));
    }

    Ok(ValidatedInput {
        document,
        role,
        job_description,
        mode,
    })
}
