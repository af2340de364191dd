use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Sub-dimensions every analysis mode asks the AI to score, in prompt order.
pub const SCORE_DIMENSIONS: [&str; 6] = [
    "impact",
    "brevity",
    "style",
    "structure",
    "skills",
    "atsCompatibility",
];

/// Analysis depth. Selects both the prompt template and the expected reply shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Quick,
    Detailed,
    Optimization,
}

impl AnalysisMode {
    /// Maps the `analysisType` form value to a mode.
    /// Anything other than `quick` or `detailed` selects `optimization`.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "quick" => AnalysisMode::Quick,
            "detailed" => AnalysisMode::Detailed,
            _ => AnalysisMode::Optimization,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "quick",
            AnalysisMode::Detailed => "detailed",
            AnalysisMode::Optimization => "optimization",
        }
    }

    pub fn is_known(value: &str) -> bool {
        matches!(value.trim(), "quick" | "detailed" | "optimization")
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file received from the client. Request-scoped; dropped after extraction.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub content: Bytes,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedDocument {
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }

    /// True when the declared content type is `application/pdf`, or, with no
    /// declared type, when the file name ends in `.pdf`.
    pub fn is_pdf(&self) -> bool {
        match self.media_type.as_deref() {
            Some(media_type) => media_type
                .split(';')
                .next()
                .map(|essence| essence.trim().eq_ignore_ascii_case("application/pdf"))
                .unwrap_or(false),
            None => self
                .file_name
                .as_deref()
                .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
                .unwrap_or(false),
        }
    }
}

/// Raw inputs for one analysis, exactly as received. Validated by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub document: Option<UploadedDocument>,
    pub role: Option<String>,
    pub job_description: Option<String>,
    pub analysis_type: Option<String>,
}

/// Validated request handed to the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub extracted_text: String,
    pub role: Option<String>,
    pub job_description: Option<String>,
    pub mode: AnalysisMode,
}

/// AI-produced analysis.
///
/// Only `overallScore` and `scores` are guaranteed. Every other field the AI
/// returns is kept untyped in `extra` and read through the accessors below,
/// so a reply missing optional sections (or carrying new ones) still parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: Number,
    pub scores: BTreeMap<String, Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn score(&self, dimension: &str) -> Option<f64> {
        self.scores.get(dimension).and_then(Number::as_f64)
    }

    pub fn analysis(&self) -> Option<&str> {
        self.extra.get("analysis").and_then(Value::as_str)
    }

    pub fn strengths(&self) -> Option<Vec<&str>> {
        self.string_list("strengths")
    }

    pub fn improvements(&self) -> Option<Vec<&str>> {
        self.string_list("improvements")
    }

    pub fn missing_keywords(&self) -> Option<Vec<&str>> {
        self.string_list("missingKeywords")
    }

    pub fn ats_improvements(&self) -> Option<Vec<&str>> {
        self.string_list("atsImprovements")
    }

    pub fn formatting_tips(&self) -> Option<Vec<&str>> {
        self.string_list("formattingTips")
    }

    /// Section name → narrative, for detailed mode. Non-string values are skipped.
    pub fn section_analysis(&self) -> Option<BTreeMap<&str, &str>> {
        let sections = self.extra.get("sectionAnalysis")?.as_object()?;
        Some(
            sections
                .iter()
                .filter_map(|(name, text)| text.as_str().map(|t| (name.as_str(), t)))
                .collect(),
        )
    }

    /// Requested sub-dimensions the AI left out. Reported, never enforced.
    pub fn missing_dimensions(&self) -> Vec<&'static str> {
        SCORE_DIMENSIONS
            .into_iter()
            .filter(|dimension| self.score(dimension).is_none())
            .collect()
    }

    fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        let items = self.extra.get(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }
}
