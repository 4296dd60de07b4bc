// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// Appended to every system prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Reply with exactly one JSON object matching the schema in this prompt. \
    No prose before or after it, no markdown code fences, no comments inside it. \
    If something cannot be assessed, still return the object and say so in the relevant field.";
