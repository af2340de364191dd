// Resume analysis: PDF text extraction, prompt templating, AI call, reply parsing.
// All AI calls go through llm_client::AiService.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod response_parser;
