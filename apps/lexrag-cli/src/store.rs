//! JSON chunk files: the CLI's only persisted format.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use lexrag_core::ingest::IngestedDocument;
use lexrag_core::Chunk;

/// Where a flattened chunk came from.
#[derive(Debug, Clone)]
pub struct ChunkOrigin {
    pub file_name: String,
    pub chunk_index: usize,
}

pub fn load_documents(path: &Path) -> Result<Vec<IngestedDocument>> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read chunk file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse chunk file {}", path.display()))
}

pub fn write_documents(docs: &[IngestedDocument], out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(docs)?;
    match out {
        Some(path) => fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// All chunks of all documents in order, with a parallel list of origins.
pub fn flatten(docs: Vec<IngestedDocument>) -> (Vec<Chunk>, Vec<ChunkOrigin>) {
    let mut chunks = Vec::new();
    let mut origins = Vec::new();
    for doc in docs {
        for (chunk_index, chunk) in doc.chunks.into_iter().enumerate() {
            origins.push(ChunkOrigin { file_name: doc.file_name.clone(), chunk_index });
            chunks.push(chunk);
        }
    }
    (chunks, origins)
}
