// LLM prompt constants for JD gap analysis.

/// System prompt for gap analysis. Enforces JSON-only output.
pub const GAP_ANALYSIS_SYSTEM: &str = "You are an expert career coach and resume analyst. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Gap analysis prompt. Replace `{market_context}`, `{resume_text}` and
/// `{job_description}` before sending.
pub const GAP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Compare the following resume against a specific job description to identify key skill gaps.

## Market Standards Context (Retrieved from Knowledge Base):
{market_context}

## Resume:
{resume_text}

## Job Description:
{job_description}

Analyze the resume against the job description and identify the 4-6 most critical missing skills that the candidate needs to learn to be competitive for this role.

Provide your response as a JSON object with this exact structure:
{
  "missingSkills": ["<skill 1>", "<skill 2>", "<skill 3>", "<skill 4>", "<skill 5>", "<skill 6>"],
  "matchScore": <number 0-100 representing overall fit>,
  "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
  "gaps": ["<gap 1>", "<gap 2>", "<gap 3>"]
}

Important:
- Extract SPECIFIC technical skills, frameworks, tools, and technologies mentioned in the JD but missing from the resume
- Focus on concrete, learnable skills that can be taught via YouTube tutorials and Udemy courses
- Examples of good skills: "React", "TypeScript", "AWS Lambda", "Docker", "Kubernetes", "MongoDB", "GraphQL", "Node.js", "Python", "TensorFlow"
- AVOID generic skills like "Problem Solving", "Communication", "Teamwork" - focus on technical skills only
- Return exactly 4-6 skills (no more, no less)
- Each skill should be a specific technology, framework, or tool that appears in the job description
- Match score should reflect how well the resume matches the JD requirements (0-100)"#;

pub const GAP_ANALYSIS_TEMPERATURE: f32 = 0.3;
