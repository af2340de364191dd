// Shared prompt fragments. Feature prompts live beside the feature (analysis/prompts.rs).

/// Appended to every prompt that expects a structured reply.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Use integers from 0 to 100 for every score.";
