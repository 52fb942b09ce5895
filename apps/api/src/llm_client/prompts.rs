// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction appended to every analysis prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON, no additional text or markdown.";
