use std::sync::Arc;
use tracing::debug;

use lexrag_core::rank::{into_chunks, top_k};
use lexrag_core::traits::{ChunkRanker, Embedder};
use lexrag_core::{Chunk, Error, ScoredChunk, SourceKind};

/// `dot(a, b) / (|a| * |b|)`, or `0.0` when either norm is zero or the
/// lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Rank the chunks that carry a non-empty embedding by cosine similarity to
/// `query_embedding`; chunks without one are skipped.
pub fn retrieve_top_k_scored<'a>(query_embedding: &[f32], chunks: &'a [Chunk], k: usize) -> Vec<ScoredChunk<'a>> {
    if k == 0 {
        return Vec::new();
    }
    let hits: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| {
            let embedding = chunk.embedding().filter(|e| !e.is_empty())?;
            let score = f64::from(cosine_similarity(query_embedding, embedding));
            Some(ScoredChunk { chunk, index, score, source: SourceKind::Vector })
        })
        .collect();
    debug!(chunks = chunks.len(), embedded = hits.len(), k, "vector scoring");
    top_k(hits, k)
}

pub fn retrieve_top_k<'a>(query_embedding: &[f32], chunks: &'a [Chunk], k: usize) -> Vec<&'a Chunk> {
    into_chunks(retrieve_top_k_scored(query_embedding, chunks, k))
}

/// [`ChunkRanker`] that embeds the query text, then ranks by cosine similarity.
#[derive(Clone)]
pub struct VectorRanker {
    embedder: Arc<dyn Embedder>,
}

impl VectorRanker {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn embed_query(&self, query: &str) -> lexrag_core::Result<Vec<f32>> {
        self.embedder
            .embed_batch(&[query.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("embedder returned no vector for the query".into()))
    }
}

impl ChunkRanker for VectorRanker {
    fn rank<'a>(&self, query: &str, chunks: &'a [Chunk], k: usize) -> lexrag_core::Result<Vec<ScoredChunk<'a>>> {
        if k == 0 || chunks.is_empty() {
            return Ok(Vec::new());
        }
        let query_embedding = self.embed_query(query)?;
        Ok(retrieve_top_k_scored(&query_embedding, chunks, k))
    }
}
