//! Builds the market-standards context block injected into analysis prompts.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::rag::knowledge_base::Category;
use crate::rag::vector_store::{RetrievalResult, VectorStore, VectorStoreError};

const FORMAT_QUERY: &str = "resume format structure best practices";
const FORMAT_CATEGORIES: [Category; 3] =
    [Category::ResumeFormat, Category::Achievements, Category::Ats];
const FORMAT_TOP_K: usize = 3;
const CONTENT_TOP_K: usize = 4;
/// Results sharing this many leading characters are treated as duplicates.
const DEDUP_PREFIX_CHARS: usize = 50;
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";
const CONTEXT_HEADING: &str = "## Retrieved Market Standards (from knowledge base):";

pub const FALLBACK_CONTEXT: &str = "## Market Standards (2024-2025):

### In-Demand Technical Skills:
- Frontend: React, Next.js, TypeScript, Tailwind CSS
- Backend: Node.js, Python, Go, GraphQL, REST APIs
- Cloud: AWS, Azure, GCP, Docker, Kubernetes, Terraform
- Data/AI: Python, SQL, TensorFlow, PyTorch, LangChain

### Resume Best Practices:
- Use action verbs: Led, Developed, Implemented, Optimized
- Quantify achievements with metrics (%, $, numbers)
- Keep to 1-2 pages
- Include: Contact, Summary, Experience, Skills, Education
- Tailor keywords for ATS systems

### Soft Skills in Demand:
- Leadership & team collaboration
- Communication (written/verbal)
- Problem-solving
- Agile/Scrum methodologies";

/// Returns retrieved context for `text`, or `FALLBACK_CONTEXT` if retrieval fails.
pub async fn get_relevant_context(store: &VectorStore, text: &str) -> String {
    match retrieve_context(store, text).await {
        Ok(context) => {
            debug!("Retrieved context length: {}", context.len());
            context
        }
        Err(e) => {
            warn!("Context retrieval failed, using fallback context: {e}");
            FALLBACK_CONTEXT.to_string()
        }
    }
}

async fn retrieve_context(store: &VectorStore, text: &str) -> Result<String, VectorStoreError> {
    let format_results = store
        .search_by_category(FORMAT_QUERY, &FORMAT_CATEGORIES, FORMAT_TOP_K)
        .await?;
    let content_results = store.search(text, CONTENT_TOP_K).await?;

    let merged = dedup_by_prefix(format_results.iter().chain(content_results.iter()));
    Ok(format!(
        "{CONTEXT_HEADING}\n\n{}",
        merged.join(CONTEXT_SEPARATOR)
    ))
}

/// Keeps the first result for each distinct content prefix, dropping empty contents.
fn dedup_by_prefix<'a>(results: impl Iterator<Item = &'a RetrievalResult>) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    results
        .filter(|r| !r.content.is_empty())
        .filter(|r| {
            let key: String = r.content.chars().take(DEDUP_PREFIX_CHARS).collect();
            seen.insert(key)
        })
        .map(|r| r.content)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::embedding::{Embedder, HashingEmbedder};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        async fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorStoreError> {
            Err(VectorStoreError::Embedding("model offline".to_string()))
        }
    }

    fn result(content: &'static str) -> RetrievalResult {
        RetrievalResult {
            id: "x",
            content,
            score: 0.5,
            category: Category::Ats,
        }
    }

    #[test]
    fn test_dedup_by_prefix_drops_shared_prefix() {
        let first = "Resume Structure Best Practices: keep resume to one or two pages (first)";
        let second = "Resume Structure Best Practices: keep resume to one or two pages (second)";
        let results = [result(first), result(second), result("other")];
        assert_eq!(dedup_by_prefix(results.iter()), vec![first, "other"]);
    }

    #[test]
    fn test_dedup_by_prefix_drops_empty() {
        let results = [result(""), result("kept")];
        assert_eq!(dedup_by_prefix(results.iter()), vec!["kept"]);
    }

    #[tokio::test]
    async fn test_context_has_heading_and_no_duplicates() {
        let store = VectorStore::new(Arc::new(HashingEmbedder::default()));
        // Text overlapping the format query makes both searches hit the same documents.
        let context = get_relevant_context(&store, FORMAT_QUERY).await;
        assert!(context.starts_with(CONTEXT_HEADING));

        let blocks: Vec<&str> = context
            .trim_start_matches(CONTEXT_HEADING)
            .trim_start()
            .split(CONTEXT_SEPARATOR)
            .collect();
        let unique: HashSet<&str> = blocks.iter().copied().collect();
        assert_eq!(blocks.len(), unique.len());
        assert!(blocks.len() >= FORMAT_TOP_K && blocks.len() <= FORMAT_TOP_K + CONTENT_TOP_K);
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_context() {
        let store = VectorStore::new(Arc::new(FailingEmbedder));
        let context = get_relevant_context(&store, "some resume").await;
        assert_eq!(context, FALLBACK_CONTEXT);
    }
}
