// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Preamble that enforces JSON-only completions. Gemini takes a single prompt
/// string, so this is prepended rather than sent as a system message.
pub const JSON_ONLY_INSTRUCTION: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
