use std::hash::{Hash, Hasher};
use tracing::info;
use twox_hash::XxHash64;

use lexrag_core::traits::Embedder;
use lexrag_core::{Chunk, Error, Result};

pub const DEFAULT_DIM: usize = 256;

/// Feature-hashing embedder: every lower-cased token lands in one of `dim`
/// buckets with a hash-derived sign, and the result is L2-normalized.
///
/// Deterministic across runs and machines. Text without tokens embeds to the
/// zero vector.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig("embedding dimension must be at least 1".into()));
        }
        Ok(Self { dim })
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if token.is_empty() {
                continue;
            }
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
            v[idx] += sign;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dim: DEFAULT_DIM }
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// New chunks with the same text as `chunks`, each carrying an embedding.
pub fn attach_embeddings(chunks: &[Chunk], embedder: &dyn Embedder) -> Result<Vec<Chunk>> {
    let texts: Vec<String> = chunks.iter().map(|c| c.text().to_string()).collect();
    let embeddings = embedder.embed_batch(&texts)?;
    if embeddings.len() != chunks.len() {
        return Err(Error::Embedding(format!(
            "expected {} vectors, embedder returned {}",
            chunks.len(),
            embeddings.len()
        )));
    }
    if let Some(bad) = embeddings.iter().find(|e| e.len() != embedder.dim()) {
        return Err(Error::Embedding(format!("expected dimension {}, got {}", embedder.dim(), bad.len())));
    }
    info!(chunks = chunks.len(), dim = embedder.dim(), "attached embeddings");
    Ok(chunks
        .iter()
        .zip(embeddings)
        .map(|(c, e)| Chunk::with_embedding(c.text(), e))
        .collect())
}
