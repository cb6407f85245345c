// Resume structuring: raw text → fixed-schema extraction prompt → ResumeRecord.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod prompts;
pub mod structurer;
