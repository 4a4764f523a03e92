use std::cmp::Ordering;

use crate::types::{Chunk, ScoredChunk};

/// Sort hits best first and keep the leading `k`.
///
/// The sort is stable, so equal scores keep input order.
pub fn top_k(mut hits: Vec<ScoredChunk<'_>>, k: usize) -> Vec<ScoredChunk<'_>> {
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(k);
    hits
}

pub fn into_chunks<'a>(hits: Vec<ScoredChunk<'a>>) -> Vec<&'a Chunk> {
    hits.into_iter().map(|h| h.chunk).collect()
}
