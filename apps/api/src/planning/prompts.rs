// LLM prompt constants for the Planning module.
// The JSON-only preamble comes from llm_client::prompts.

/// Length of the onboarding period in weeks. A template parameter, not a
/// negotiated value — the week1..week4 schema is fixed-shape.
pub const INTEGRATION_WEEKS: u32 = 4;

// Company technology stacks the candidate is compared against. Enumerated
// here, not fetched — these change when the company stack changes.
pub const FRONTEND_STACK: &str = "React Query, Redux-Saga, Formik, Yup, Chakra v2, Monorepos, Vite";
pub const REACT_NATIVE_STACK: &str = "React Query, Zustand, Keychain, MMKV, Zod, React Hook Form";
pub const BACKEND_STACK: &str = "Node.js, Express.js, Prisma, PostgreSQL, tRPC, Authentication, CI/CD";

/// Plan prompt template.
/// Replace: `{profile_type}`, `{weeks}`, `{frontend_stack}`,
///          `{react_native_stack}`, `{backend_stack}`, `{resume_text}`
pub const PLAN_PROMPT_TEMPLATE: &str = r#"You are preparing the onboarding of a new developer who declared a "{profile_type}" profile.

1. Classify the candidate as "frontend" or "backend" from the resume below.
2. Compare the candidate's evident skills against the company technology stacks:
   - Frontend: {frontend_stack}
   - React Native: {react_native_stack}
   - Backend: {backend_stack}
   Treat overlapping technologies as strengths and missing stack items as focus areas.
3. Write a {weeks}-week integration plan. The first half covers technology
   training on the focus areas; the second half covers organizational and team
   integration. Express each week as a bullet-point string.
4. Set "name" to the candidate's full name from the resume, or "" if unknown.

Return a JSON object with this EXACT schema:
{
  "type": "frontend" | "backend",
  "name": string,
  "plan": {
    "week1": string,
    "week2": string,
    "week3": string,
    "week4": string
  }
}

RESUME:
{resume_text}"#;
