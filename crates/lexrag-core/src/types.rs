//! Domain types shared by the keyword and vector rankers.

use serde::{Deserialize, Serialize};

/// A word-bounded slice of an ingested document; the unit of retrieval.
///
/// - `text`: the chunk payload, fixed at construction
/// - `embedding`: optional vector, only consulted by the vector ranker
///
/// Chunks carry no id and no link back to their document; callers identify
/// them by position in the sequence they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    embedding: Option<Vec<f32>>,
}

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), embedding: None }
    }

    pub fn with_embedding(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self { text: text.into(), embedding: Some(embedding) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    /// True when the chunk carries a non-empty embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Indicates which ranker produced a hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Keyword,
    Vector,
}

/// Which ranking strategy a caller asks for.
///
/// `Auto` uses the vector ranker only when embeddings are available.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    #[default]
    Auto,
    Keyword,
    Vector,
}

/// A ranked hit borrowing its chunk from the caller's collection.
///
/// `index` is the chunk's position in the input slice. `score` is
/// ranker-specific but higher is always better; the keyword fallback path
/// reports `0.0` for every hit.
#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub index: usize,
    pub score: f64,
    pub source: SourceKind,
}
