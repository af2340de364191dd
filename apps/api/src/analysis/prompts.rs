//! Prompt templates for resume analysis, one per mode.
//!
//! Placeholders: `{role}`, `{resume_text}`, `{job_description_line}`, `{json_only}`.
//! Substitution is a single left-to-right pass, so placeholder-looking text
//! inside the resume or job description is copied through untouched.

use crate::analysis::models::{AnalysisMode, AnalysisRequest};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Quick scan: overall score, 3 strengths, 2 improvements, 6 sub-scores.
pub const QUICK_PROMPT_TEMPLATE: &str = r#"You are ResumeChecker, an expert resume reviewer. Give a quick scan of the resume below for a {role} position.

1. Give an overall ATS score out of 100
2. List 3 key strengths
3. Suggest 2 quick improvements
4. Rate each of these out of 100: Impact, Brevity, Style, Structure, Skills, ATS Compatibility

Resume text: {resume_text}
{job_description_line}

{json_only}
Return a JSON object with this EXACT structure:
{
  "overallScore": number,
  "scores": {
    "impact": number,
    "brevity": number,
    "style": number,
    "structure": number,
    "skills": number,
    "atsCompatibility": number
  },
  "strengths": ["strength1", "strength2", "strength3"],
  "improvements": ["improvement1", "improvement2"],
  "analysis": "short summary of the resume"
}"#;

/// Detailed review: overall score, 6 sub-scores, 5 strengths, 5 improvements, per-section narrative.
pub const DETAILED_PROMPT_TEMPLATE: &str = r#"You are ResumeChecker, an expert resume reviewer. Give a detailed analysis of the resume below for a {role} position.

1. Give an overall ATS score out of 100
2. Rate each of these out of 100: Impact, Brevity, Style, Structure, Skills, ATS Compatibility
3. List 5 strengths of the resume
4. Suggest 5 areas for improvement, each with a specific recommendation
5. Analyse each section of the resume

Resume text: {resume_text}
{job_description_line}

{json_only}
Return a JSON object with this EXACT structure:
{
  "overallScore": number,
  "scores": {
    "impact": number,
    "brevity": number,
    "style": number,
    "structure": number,
    "skills": number,
    "atsCompatibility": number
  },
  "strengths": ["strength1", "strength2", "strength3", "strength4", "strength5"],
  "improvements": ["improvement1", "improvement2", "improvement3", "improvement4", "improvement5"],
  "analysis": "detailed analysis text",
  "sectionAnalysis": {
    "summary": "analysis of the summary section",
    "experience": "analysis of the experience section",
    "skills": "analysis of the skills section",
    "education": "analysis of the education section"
  }
}"#;

/// ATS optimization: overall score, 6 sub-scores, missing keywords, ATS fixes, formatting tips.
pub const OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"You are ResumeChecker, an expert in Applicant Tracking System (ATS) optimization. Analyse the resume below for a {role} position.

1. Give an overall ATS score out of 100
2. Rate each of these out of 100: Impact, Brevity, Style, Structure, Skills, ATS Compatibility
3. Identify keywords from the job description that the resume is missing
4. Suggest ATS optimization improvements
5. Give formatting recommendations

Resume text: {resume_text}
{job_description_line}

{json_only}
Return a JSON object with this EXACT structure:
{
  "overallScore": number,
  "scores": {
    "impact": number,
    "brevity": number,
    "style": number,
    "structure": number,
    "skills": number,
    "atsCompatibility": number
  },
  "missingKeywords": ["keyword1", "keyword2", "keyword3"],
  "atsImprovements": ["improvement1", "improvement2", "improvement3"],
  "formattingTips": ["tip1", "tip2", "tip3"],
  "analysis": "detailed ATS analysis text"
}"#;

pub fn template_for(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Quick => QUICK_PROMPT_TEMPLATE,
        AnalysisMode::Detailed => DETAILED_PROMPT_TEMPLATE,
        AnalysisMode::Optimization => OPTIMIZATION_PROMPT_TEMPLATE,
    }
}

/// Builds the instruction sent to the AI. Pure and deterministic.
///
/// A missing role renders as an empty string; a missing job description drops
/// the job-description line's content entirely.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let job_description_line = request
        .job_description
        .as_deref()
        .map(|jd| format!("Job description: {jd}"))
        .unwrap_or_default();

    render(
        template_for(request.mode),
        &[
            ("role", request.role.as_deref().unwrap_or_default()),
            ("resume_text", &request.extracted_text),
            ("job_description_line", &job_description_line),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Replaces `{name}` placeholders in one pass. Unknown `{...}` text (the JSON
/// schema braces) is emitted as-is.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });

        match substituted {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::SCORE_DIMENSIONS;

    const RESUME: &str = "Jane Doe\nBackend Engineer\nBuilt payment APIs in Rust serving 2M requests/day.";

    fn request(mode: AnalysisMode, job_description: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            extracted_text: RESUME.to_string(),
            role: Some("Backend Engineer".to_string()),
            job_description: job_description.map(String::from),
            mode,
        }
    }

    const ALL_MODES: [AnalysisMode; 3] = [
        AnalysisMode::Quick,
        AnalysisMode::Detailed,
        AnalysisMode::Optimization,
    ];

    #[test]
    fn test_prompt_is_deterministic_for_every_mode() {
        for mode in ALL_MODES {
            let first = build_prompt(&request(mode, Some("Rust, Postgres")));
            let second = build_prompt(&request(mode, Some("Rust, Postgres")));
            assert_eq!(first, second, "mode {mode} is not deterministic");
        }
    }

    #[test]
    fn test_modes_select_distinct_templates() {
        let quick = build_prompt(&request(AnalysisMode::Quick, None));
        let detailed = build_prompt(&request(AnalysisMode::Detailed, None));
        let optimization = build_prompt(&request(AnalysisMode::Optimization, None));
        assert_ne!(quick, detailed);
        assert_ne!(detailed, optimization);
        assert_ne!(quick, optimization);
    }

    #[test]
    fn test_resume_and_role_embedded_verbatim() {
        for mode in ALL_MODES {
            let prompt = build_prompt(&request(mode, None));
            assert!(prompt.contains(RESUME));
            assert!(prompt.contains("for a Backend Engineer position"));
            assert!(!prompt.contains("{role}"));
            assert!(!prompt.contains("{resume_text}"));
            assert!(!prompt.contains("{json_only}"));
        }
    }

    #[test]
    fn test_job_description_line_only_when_present() {
        let with_jd = build_prompt(&request(AnalysisMode::Quick, Some("Must know Kafka")));
        assert!(with_jd.contains("Job description: Must know Kafka"));

        let without_jd = build_prompt(&request(AnalysisMode::Quick, None));
        assert!(!without_jd.contains("Job description:"));
        assert!(!without_jd.contains("{job_description_line}"));
    }

    #[test]
    fn test_missing_role_is_empty_interpolation() {
        let mut req = request(AnalysisMode::Optimization, Some("Staff SRE"));
        req.role = None;
        let prompt = build_prompt(&req);
        assert!(prompt.contains("for a  position"));
    }

    #[test]
    fn test_every_mode_asks_for_all_score_dimensions() {
        for mode in ALL_MODES {
            let prompt = build_prompt(&request(mode, None));
            assert!(prompt.contains("\"overallScore\": number"));
            for dimension in SCORE_DIMENSIONS {
                assert!(
                    prompt.contains(&format!("\"{dimension}\": number")),
                    "mode {mode} missing {dimension}"
                );
            }
        }
    }

    #[test]
    fn test_mode_specific_fields() {
        let quick = build_prompt(&request(AnalysisMode::Quick, None));
        assert!(quick.contains("List 3 key strengths"));
        assert!(quick.contains("\"improvements\": [\"improvement1\", \"improvement2\"]"));

        let detailed = build_prompt(&request(AnalysisMode::Detailed, None));
        assert!(detailed.contains("\"sectionAnalysis\""));
        assert!(detailed.contains("\"strength5\""));

        let optimization = build_prompt(&request(AnalysisMode::Optimization, None));
        assert!(optimization.contains("\"missingKeywords\""));
        assert!(optimization.contains("\"atsImprovements\""));
        assert!(optimization.contains("\"formattingTips\""));
        assert!(!optimization.contains("\"strengths\""));
    }

    #[test]
    fn test_placeholders_inside_inputs_are_not_expanded() {
        let mut req = request(AnalysisMode::Quick, Some("Mention {role} twice"));
        req.extracted_text = "Skills: {resume_text} {json_only} {unclosed".to_string();
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Resume text: Skills: {resume_text} {json_only} {unclosed"));
        assert!(prompt.contains("Job description: Mention {role} twice"));
    }

    #[test]
    fn test_render_leaves_unknown_braces() {
        assert_eq!(
            render("{a} {\"x\": 1} {b", &[("a", "A")]),
            "A {\"x\": 1} {b"
        );
    }
}
