//! lexrag-vector
//!
//! Cosine-similarity ranking over chunks that carry embeddings, plus a local
//! hashing embedder to produce them without a model or network.

pub mod embed;
pub mod search;

pub use embed::{attach_embeddings, HashingEmbedder};
pub use search::{cosine_similarity, retrieve_top_k, retrieve_top_k_scored, VectorRanker};
