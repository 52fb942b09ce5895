// LLM prompt constants for resume analysis.
// Reuses the JSON-only fragments from llm_client::prompts.

/// System prompt for resume analysis. Enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "You are an expert resume analyst and career coach. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Resume analysis prompt. Replace `{market_context}` and `{resume_text}` before sending.
/// The closing JSON-only instruction is appended by the caller.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume against current market standards.

## Market Standards Context (Retrieved from Knowledge Base):
{market_context}

## Resume to Analyze:
{resume_text}

Analyze this resume and provide a detailed JSON response with the following structure:
{
  "overallScore": <number 0-100>,
  "sections": [
    {
      "title": "Contact Information",
      "score": <number 0-100>,
      "feedback": "<brief feedback>",
      "suggestions": ["<suggestion 1>", "<suggestion 2>"]
    },
    {
      "title": "Professional Summary",
      "score": <number 0-100>,
      "feedback": "<brief feedback>",
      "suggestions": ["<suggestion 1>", "<suggestion 2>"]
    },
    {
      "title": "Work Experience",
      "score": <number 0-100>,
      "feedback": "<brief feedback>",
      "suggestions": ["<suggestion 1>", "<suggestion 2>"]
    },
    {
      "title": "Skills & Technologies",
      "score": <number 0-100>,
      "feedback": "<brief feedback>",
      "suggestions": ["<suggestion 1>", "<suggestion 2>"]
    },
    {
      "title": "Education & Certifications",
      "score": <number 0-100>,
      "feedback": "<brief feedback>",
      "suggestions": ["<suggestion 1>", "<suggestion 2>"]
    }
  ],
  "marketComparison": {
    "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
    "gaps": ["<gap 1>", "<gap 2>", "<gap 3>"],
    "inDemandSkills": ["<skill they should learn 1>", "<skill 2>", "<skill 3>", "<skill 4>", "<skill 5>"]
  },
  "tips": [
    "<actionable tip 1>",
    "<actionable tip 2>",
    "<actionable tip 3>",
    "<actionable tip 4>",
    "<actionable tip 5>",
    "<actionable tip 6>"
  ],
  "summary": "<2-3 sentence overall assessment>"
}

Be specific, actionable, and constructive in your feedback. Consider current 2024-2025 job market trends."#;

/// Sampling temperature for analysis calls.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
