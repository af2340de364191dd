//! AI reply parsing — recovers the analysis JSON object from a free-text reply.
//!
//! Heuristic: take everything from the first `{` to the last `}`, drop any
//! markdown fence markers inside it, and parse that. With no such span the
//! whole reply is parsed as-is.
//!
//! Known fragility, kept on purpose: the span is not brace-balanced. A reply
//! with brace-containing prose before or after the real object (for example an
//! inline `{...}` example) yields a span covering both, which fails to parse.

use thiserror::Error;

use crate::analysis::models::AnalysisResult;

#[derive(Debug, Error)]
#[error("AI reply is not a valid analysis object: {source}")]
pub struct ParseError {
    /// The unmodified reply, kept for server-side diagnostics only.
    pub raw_reply: String,
    #[source]
    pub source: serde_json::Error,
}

/// Returns the candidate JSON text from a raw AI reply.
pub fn extract_json_payload(reply: &str) -> String {
    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if end > start => reply[start..=end]
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string(),
        _ => reply.to_string(),
    }
}

/// Parses a raw AI reply into an `AnalysisResult`.
///
/// Requires numeric `overallScore` and a `scores` object of numbers; every
/// other field passes through untyped. Never fills in defaults.
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, ParseError> {
    let payload = extract_json_payload(reply);
    serde_json::from_str(&payload).map_err(|source| ParseError {
        raw_reply: reply.to_string(),
        source,
    })
}
