use std::sync::Arc;
use tracing::{debug, warn};

use lexrag_core::config::RetrievalConfig;
use lexrag_core::rank::into_chunks;
use lexrag_core::traits::{ChunkRanker, Embedder};
use lexrag_core::{Chunk, Result, RetrievalMode, ScoredChunk, SourceKind};
use lexrag_text::KeywordRanker;
use lexrag_vector::VectorRanker;

/// The ranking strategy chosen for one chunk set.
///
/// The keyword and vector paths share nothing but the chunk type; this enum
/// only decides which one runs and with which `k`.
#[derive(Clone)]
pub enum Retriever {
    Keyword { k: usize },
    Vector { k: usize, ranker: VectorRanker },
}

impl Retriever {
    pub fn keyword(k: usize) -> Self {
        Self::Keyword { k }
    }

    pub fn vector(k: usize, embedder: Arc<dyn Embedder>) -> Self {
        Self::Vector { k, ranker: VectorRanker::new(embedder) }
    }

    /// Pick a strategy for `chunks`.
    ///
    /// The vector path needs an embedder and at least one embedded chunk;
    /// `Auto` uses it only then, and a forced `Vector` mode falls back to
    /// keywords without it.
    pub fn for_chunks(config: &RetrievalConfig, chunks: &[Chunk], embedder: Option<Arc<dyn Embedder>>) -> Self {
        let embedded = chunks.iter().filter(|c| c.has_embedding()).count();
        match (config.mode, embedder) {
            (RetrievalMode::Keyword, _) => Self::keyword(config.keyword_k),
            (RetrievalMode::Auto | RetrievalMode::Vector, Some(embedder)) if embedded > 0 => {
                debug!(embedded, "using vector retrieval");
                Self::vector(config.vector_k, embedder)
            }
            (RetrievalMode::Vector, embedder) => {
                warn!(
                    embedded,
                    has_embedder = embedder.is_some(),
                    "vector retrieval unavailable, falling back to keywords"
                );
                Self::keyword(config.keyword_k)
            }
            (RetrievalMode::Auto, _) => Self::keyword(config.keyword_k),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Keyword { .. } => SourceKind::Keyword,
            Self::Vector { .. } => SourceKind::Vector,
        }
    }

    pub fn k(&self) -> usize {
        match self {
            Self::Keyword { k } | Self::Vector { k, .. } => *k,
        }
    }

    pub fn rank_scored<'a>(&self, query: &str, chunks: &'a [Chunk]) -> Result<Vec<ScoredChunk<'a>>> {
        match self {
            Self::Keyword { k } => KeywordRanker.rank(query, chunks, *k),
            Self::Vector { k, ranker } => ranker.rank(query, chunks, *k),
        }
    }
}

/// Chunks to place in the prompt for a user message.
///
/// Nothing is ranked when the caller holds no chunks or the message is blank.
pub fn retrieve_context<'a>(retriever: &Retriever, query: &str, chunks: &'a [Chunk]) -> Result<Vec<&'a Chunk>> {
    Ok(into_chunks(retrieve_context_scored(retriever, query, chunks)?))
}

pub fn retrieve_context_scored<'a>(
    retriever: &Retriever,
    query: &str,
    chunks: &'a [Chunk],
) -> Result<Vec<ScoredChunk<'a>>> {
    if chunks.is_empty() || query.trim().is_empty() {
        debug!("no chunks or blank message, skipping retrieval");
        return Ok(Vec::new());
    }
    retriever.rank_scored(query, chunks)
}
