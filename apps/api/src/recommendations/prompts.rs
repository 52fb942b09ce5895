// LLM prompt constants for course recommendations.

pub const COURSES_SYSTEM: &str = "You are an expert education advisor specializing in online learning platforms. \
    Provide course recommendations in valid JSON format only.";

/// Replace `{topic}`, `{level}`, `{context}` and `{search_url}` before sending.
pub const COURSES_PROMPT_TEMPLATE: &str = r#"As an expert education advisor, recommend 5 specific Udemy courses for learning "{topic}" at {level} level.

Context:
{context}

Provide your response as a JSON object with this exact structure:
{
  "courses": [
    {
      "id": "unique-id-1",
      "title": "Specific, realistic course title (e.g., 'Complete React Developer Course 2024' or 'AWS Certified Solutions Architect Associate')",
      "description": "Detailed 2-sentence description explaining what the course covers, what you'll learn, and what projects you'll build",
      "instructor": "Realistic instructor name or expertise (e.g., 'Brad Traversy' or 'Senior Cloud Architect')",
      "level": "{level}",
      "url": "{search_url}",
      "rating": 4.5,
      "isAiGenerated": true
    }
  ],
  "insights": "A brief 2-3 sentence personalized insight about the user's learning path. Mention why these courses are good for {level} learners and how they relate to the topic."
}

Important:
- Course titles must be SPECIFIC and REALISTIC - use actual course naming patterns from Udemy
- Focus on practical, hands-on courses that teach "{topic}" effectively
- Descriptions should mention specific technologies, tools, or concepts covered
- For {level} level, adjust complexity appropriately
- All URLs should point to Udemy's search page: {search_url}
- Make recommendations sound like real, popular Udemy courses
- If user history shows progression, acknowledge that in insights"#;

pub const COURSES_TEMPERATURE: f32 = 0.7;
pub const COURSES_MAX_TOKENS: u32 = 2000;
