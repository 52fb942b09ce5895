//! Text embedding backends for the vector store.
//!
//! Default: `FastEmbedder`, the all-MiniLM-L6-v2 sentence model run locally
//! through fastembed (ONNX). Weights are downloaded into the cache directory
//! on first start.
//!
//! Offline fallback: `HashingEmbedder` (feature hashing over word unigrams
//! and bigrams). It only matches shared words and is used when the model
//! cannot be loaded, and in tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{info, warn};

use crate::rag::vector_store::VectorStoreError;

pub const DEFAULT_DIMENSION: usize = 512;

const MINILM_NAME: &str = "all-MiniLM-L6-v2";
const MINILM_DIMENSION: usize = 384;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it", "its",
    "of", "on", "or", "the", "to", "was", "were", "will", "with", "your", "you", "this", "that",
];

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;

    /// Embeds a batch of texts, one L2-normalised vector per input.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorStoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Sentence model
// ────────────────────────────────────────────────────────────────────────────

pub struct FastEmbedder {
    model: Arc<TextEmbedding>,
}

impl FastEmbedder {
    /// Loads the model, downloading it into `cache_dir` when missing.
    /// Blocking; call from `spawn_blocking` inside the runtime.
    pub fn new(cache_dir: &Path) -> Result<Self, VectorStoreError> {
        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_cache_dir(cache_dir.to_path_buf())
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options).map_err(|e| {
            VectorStoreError::Embedding(format!("failed to load {MINILM_NAME}: {e}"))
        })?;
        Ok(Self {
            model: Arc::new(model),
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorStoreError> {
        let model = Arc::clone(&self.model);
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        // ONNX inference is CPU-bound
        let mut vectors = tokio::task::spawn_blocking(move || model.embed(owned, None))
            .await
            .map_err(|e| VectorStoreError::Embedding(format!("embedding task failed: {e}")))?
            .map_err(|e| VectorStoreError::Embedding(e.to_string()))?;

        for vector in vectors.iter_mut() {
            normalize(vector);
        }
        Ok(vectors)
    }
}

/// Loads the sentence model, falling back to `HashingEmbedder` when it cannot
/// be loaded (no network on first start, unwritable cache directory).
pub async fn load_embedder(cache_dir: &Path) -> Arc<dyn Embedder> {
    let dir: PathBuf = cache_dir.to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || FastEmbedder::new(&dir)).await;

    match loaded {
        Ok(Ok(embedder)) => {
            info!("Embedding model {MINILM_NAME} loaded");
            Arc::new(embedder)
        }
        Ok(Err(e)) => {
            warn!("{e}; falling back to keyword hashing embeddings");
            Arc::new(HashingEmbedder::default())
        }
        Err(e) => {
            warn!("Embedding model loader panicked ({e}); falling back to keyword hashing embeddings");
            Arc::new(HashingEmbedder::default())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword hashing fallback
// ────────────────────────────────────────────────────────────────────────────

/// Feature-hashing embedder with sublinear term frequency weighting.
/// A text with no usable tokens yields the zero vector.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vector = vec![0.0_f32; self.dimension];

        let mut bump = |feature: &str| {
            let hash = fnv1a(feature.as_bytes());
            let index = (hash % self.dimension as u64) as usize;
            // sign bit spreads collisions around zero instead of piling up
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        };

        for token in &tokens {
            bump(token);
        }
        for pair in tokens.windows(2) {
            bump(&format!("{} {}", pair[0], pair[1]));
        }

        for value in vector.iter_mut() {
            if *value != 0.0 {
                *value = value.signum() * (1.0 + value.abs().ln());
            }
        }

        normalize(&mut vector);
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorStoreError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Lowercases and splits on anything that is not alphanumeric or one of `+#`,
/// so "C++", "C#" and "Node.js" survive as "c++", "c#", "node", "js".
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Cosine similarity of two vectors; 0.0 when either is the zero vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
