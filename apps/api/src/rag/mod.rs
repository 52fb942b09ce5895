// Retrieval-Augmented Generation helpers.
// Knowledge base -> embedder -> vector store -> context block for prompts.

pub mod embedding;
pub mod knowledge_base;
pub mod retrieval;
pub mod vector_store;

pub use embedding::{load_embedder, HashingEmbedder};
pub use retrieval::get_relevant_context;
pub use vector_store::VectorStore;
