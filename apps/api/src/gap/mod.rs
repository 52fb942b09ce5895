// JD Gap Analysis: compares a resume against one job description.
// Missing skills are capped at 6 and deduplicated case-insensitively on every path.

pub mod chain;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod rules;
