// Resume Analysis: RAG-backed LLM analysis with a rule-based fallback.
// Every response carries `source` so callers can tell which path produced it.

pub mod chain;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod rules;
