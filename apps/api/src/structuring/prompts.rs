// LLM prompt constants for the Structuring module.
// The JSON-only preamble comes from llm_client::prompts.

/// Extraction prompt template. Replace `{resume_text}` before sending.
/// The schema here must stay in lockstep with `models::resume::ResumeRecord`.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Extract the resume below into structured JSON.

Return a JSON object with this EXACT schema (no extra fields):
{
  "fullName": string,
  "email": string,
  "phone": string,
  "summary": string,
  "skills": string[],
  "experience": [
    { "company": string, "role": string, "start": string, "end": string, "description": string }
  ],
  "education": [
    { "school": string, "degree": string, "start": string, "end": string }
  ],
  "links": string[]
}

Use an empty string for any string the resume does not state and an empty array
for any missing list. Never emit null.

RESUME TEXT:
{resume_text}"#;
