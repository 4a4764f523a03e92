use crate::error::Result;
use crate::types::{Chunk, ScoredChunk};

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Ranks a caller-owned chunk set against a query.
///
/// Implementations return at most `k` hits, best first, each borrowing a chunk
/// from `chunks`.
pub trait ChunkRanker: Send + Sync {
    fn rank<'a>(&self, query: &str, chunks: &'a [Chunk], k: usize) -> Result<Vec<ScoredChunk<'a>>>;
}
