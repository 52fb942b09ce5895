//! In-process vector store over the static knowledge base.
//!
//! The collection is built lazily on first use and shared for the lifetime of
//! the process. Concurrent first callers wait on a single initialisation.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::rag::embedding::{cosine_similarity, Embedder};
use crate::rag::knowledge_base::{Category, KnowledgeItem, RESUME_KNOWLEDGE_BASE};

pub const COLLECTION_NAME: &str = "resume_knowledge";

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Collection '{0}' has no documents")]
    EmptyCollection(String),
}

/// A single search hit. `score` is `1 - cosine distance`.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResult {
    pub id: &'static str,
    pub content: &'static str,
    pub score: f32,
    pub category: Category,
}

struct StoredDocument {
    item: &'static KnowledgeItem,
    embedding: Vec<f32>,
}

/// An initialised, immutable collection of embedded documents.
pub struct Collection {
    name: String,
    documents: Vec<StoredDocument>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    fn query(
        &self,
        query_embedding: &[f32],
        categories: Option<&[Category]>,
        top_k: usize,
    ) -> Vec<RetrievalResult> {
        let mut hits: Vec<RetrievalResult> = self
            .documents
            .iter()
            .filter(|doc| categories.map_or(true, |cats| cats.contains(&doc.item.category)))
            .map(|doc| RetrievalResult {
                id: doc.item.id,
                content: doc.item.content,
                score: similarity_score(query_embedding, &doc.embedding),
                category: doc.item.category,
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        hits
    }
}

/// Cosine distance between two embeddings (0 for identical directions).
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// Converts a cosine distance into the `1 - distance` similarity reported on hits.
fn similarity_score(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_distance(a, b)
}

/// Thin wrapper that owns the embedder and the lazily-built collection.
pub struct VectorStore {
    embedder: Arc<dyn Embedder>,
    items: &'static [KnowledgeItem],
    collection: OnceCell<Collection>,
}

impl VectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_items(embedder, RESUME_KNOWLEDGE_BASE)
    }

    pub fn with_items(embedder: Arc<dyn Embedder>, items: &'static [KnowledgeItem]) -> Self {
        Self {
            embedder,
            items,
            collection: OnceCell::new(),
        }
    }

    /// Builds the collection on first call; later calls return the same one.
    pub async fn initialize(&self) -> Result<&Collection, VectorStoreError> {
        self.collection
            .get_or_try_init(|| self.build_collection())
            .await
    }

    /// Returns up to `top_k` documents nearest to `query`, best first.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, VectorStoreError> {
        self.query(query, None, top_k).await
    }

    /// Like `search`, restricted to documents whose category is in `categories`.
    pub async fn search_by_category(
        &self,
        query: &str,
        categories: &[Category],
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, VectorStoreError> {
        self.query(query, Some(categories), top_k).await
    }

    async fn query(
        &self,
        query: &str,
        categories: Option<&[Category]>,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, VectorStoreError> {
        let collection = self.initialize().await?;
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let query_embedding = self.embed_single(query).await?;
        Ok(collection.query(&query_embedding, categories, top_k))
    }

    async fn build_collection(&self) -> Result<Collection, VectorStoreError> {
        if self.items.is_empty() {
            return Err(VectorStoreError::EmptyCollection(COLLECTION_NAME.to_string()));
        }

        // Keywords ride along with the content so short queries can hit them.
        let texts: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("{}\n{}", item.content, item.keywords.join(", ")))
            .collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed(&refs).await?;

        if embeddings.len() != self.items.len() {
            return Err(VectorStoreError::Embedding(format!(
                "expected {} embeddings, got {}",
                self.items.len(),
                embeddings.len()
            )));
        }

        let documents = self
            .items
            .iter()
            .zip(embeddings)
            .map(|(item, embedding)| {
                self.check_dimension(&embedding)?;
                Ok(StoredDocument { item, embedding })
            })
            .collect::<Result<Vec<_>, VectorStoreError>>()?;

        info!(
            "Vector store '{}' initialized with {} documents",
            COLLECTION_NAME,
            documents.len()
        );

        Ok(Collection {
            name: COLLECTION_NAME.to_string(),
            documents,
        })
    }

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>, VectorStoreError> {
        let embedding = self
            .embedder
            .embed(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| VectorStoreError::Embedding("no embedding returned".to_string()))?;
        self.check_dimension(&embedding)?;
        Ok(embedding)
    }

    fn check_dimension(&self, embedding: &[f32]) -> Result<(), VectorStoreError> {
        let expected = self.embedder.dimension();
        if embedding.len() != expected {
            return Err(VectorStoreError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::embedding::HashingEmbedder;
    use async_trait::async_trait;

    fn store() -> VectorStore {
        VectorStore::new(Arc::new(HashingEmbedder::default()))
    }

    /// Embedder that reports one dimension but returns another.
    struct LyingEmbedder;

    #[async_trait]
    impl Embedder for LyingEmbedder {
        fn dimension(&self) -> usize {
            8
        }

        async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorStoreError> {
            Ok(texts.iter().map(|_| vec![0.5; 4]).collect())
        }
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = store();
        let first = store.initialize().await.unwrap() as *const Collection;
        let second = store.initialize().await.unwrap() as *const Collection;
        assert_eq!(first, second);
        assert_eq!(
            store.initialize().await.unwrap().len(),
            RESUME_KNOWLEDGE_BASE.len()
        );
        assert_eq!(store.initialize().await.unwrap().name(), COLLECTION_NAME);
    }

    #[tokio::test]
    async fn test_search_returns_at_most_k_sorted() {
        let results = store().search("python machine learning", 4).await.unwrap();
        assert_eq!(results.len(), 4);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_search_finds_frontend_document() {
        let results = store()
            .search("React TypeScript frontend developer with Tailwind", 1)
            .await
            .unwrap();
        assert_eq!(results[0].id, "tech-skills-frontend");
        assert!(results[0].score > 0.0 && results[0].score <= 1.0 + 1e-5);
    }

    #[tokio::test]
    async fn test_search_by_category_only_returns_requested_categories() {
        let categories = [Category::ResumeFormat, Category::Achievements, Category::Ats];
        let results = store()
            .search_by_category("resume format structure best practices", &categories, 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| categories.contains(&r.category)));
        assert_eq!(results[0].id, "resume-format-structure");
    }

    #[tokio::test]
    async fn test_search_with_zero_k_is_empty() {
        assert!(store().search("anything", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_k_larger_than_collection_returns_all() {
        let results = store()
            .search_by_category("leadership", &[Category::SoftSkills], 50)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_item_set_fails_to_initialize() {
        let store = VectorStore::with_items(Arc::new(HashingEmbedder::default()), &[]);
        assert!(matches!(
            store.initialize().await,
            Err(VectorStoreError::EmptyCollection(_))
        ));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_reported() {
        let store = VectorStore::new(Arc::new(LyingEmbedder));
        assert!(matches!(
            store.search("docker", 2).await,
            Err(VectorStoreError::DimensionMismatch {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_score_is_one_minus_cosine_distance() {
        let a = [0.6, 0.8];
        let b = [1.0, 0.0];
        assert!(cosine_distance(&a, &a).abs() < 1e-6);
        assert!((cosine_distance(&a, &b) - 0.4).abs() < 1e-6);
        assert!((similarity_score(&a, &b) - 0.6).abs() < 1e-6);
        assert!((cosine_distance(&[0.0, 1.0], &b) - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    #[ignore = "downloads the all-MiniLM-L6-v2 weights"]
    async fn test_sentence_model_matches_paraphrases() {
        use crate::rag::embedding::FastEmbedder;

        let dir = std::env::temp_dir().join("focusedu-fastembed");
        let embedder = tokio::task::spawn_blocking(move || FastEmbedder::new(&dir))
            .await
            .unwrap()
            .unwrap();
        let store = VectorStore::new(Arc::new(embedder));

        let cases = [
            ("neural nets, model training and inference", "tech-skills-ai"),
            ("UI engineer building web interfaces", "tech-skills-frontend"),
            ("mentored juniors and ran standups", "soft-skills-leadership"),
        ];
        for (query, expected) in cases {
            let hits = store.search(query, 2).await.unwrap();
            assert!(
                hits.iter().any(|h| h.id == expected),
                "{query:?} -> {:?}",
                hits.iter().map(|h| h.id).collect::<Vec<_>>()
            );
        }
    }
}
