use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::chunker::{chunk_text_with, ChunkingConfig};
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Chunks produced from one uploaded document, plus the summary the upload
/// step reports back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedDocument {
    pub file_name: String,
    pub char_count: usize,
    pub chunk_count: usize,
    pub chunks: Vec<Chunk>,
}

/// Chunk already-extracted document text. Chunks are created without
/// embeddings.
pub fn ingest_document(file_name: &str, text: &str, config: &ChunkingConfig) -> Result<IngestedDocument> {
    if text.trim().is_empty() {
        return Err(Error::EmptyText(file_name.to_string()));
    }
    let chunks: Vec<Chunk> = chunk_text_with(text, config).into_iter().map(Chunk::new).collect();
    let char_count = text.chars().count();
    info!(file_name, char_count, chunk_count = chunks.len(), "ingested document");
    Ok(IngestedDocument { file_name: file_name.to_string(), char_count, chunk_count: chunks.len(), chunks })
}

/// Read a text file (lossy on invalid UTF-8) and ingest it under its file name.
pub fn ingest_file(path: &Path, config: &ChunkingConfig) -> Result<IngestedDocument> {
    let text = read_file_content(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    ingest_document(&file_name, &text, config)
}

fn read_file_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => {
            debug!(path = %path.display(), "falling back to lossy UTF-8 decoding");
            Ok(String::from_utf8_lossy(&fs::read(path)?).to_string())
        }
    }
}

/// Every `.txt` file below `root`, sorted.
pub fn list_text_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    txt_files.sort();
    txt_files
}
