// Plan generation and storage.
// Implements: resume-source resolution, plan prompting, name override,
// best-effort persistence, and CRUD over persisted plans.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;
