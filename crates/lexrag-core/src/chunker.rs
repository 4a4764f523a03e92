//! Overlapping word-window chunking.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_TARGET_WORDS: usize = 200;
pub const DEFAULT_OVERLAP: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub target_words: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { target_words: DEFAULT_TARGET_WORDS, overlap: DEFAULT_OVERLAP }
    }
}

impl ChunkingConfig {
    pub fn new(target_words: usize, overlap: usize) -> Self {
        Self { target_words, overlap }
    }

    /// Words per window, never zero.
    pub fn window(&self) -> usize {
        self.target_words.max(1)
    }

    /// Distance between consecutive window starts, never zero.
    pub fn step(&self) -> usize {
        self.window().saturating_sub(self.overlap).max(1)
    }
}

/// Split `text` into windows of `target_words` words, each starting
/// `target_words - overlap` words after the previous one.
///
/// Whitespace runs separate words and chunks are re-joined with single
/// spaces. Windowing stops at the first window that reaches the end of the
/// text, so a document of at most `target_words` words yields one chunk.
pub fn chunk_text(text: &str, target_words: usize, overlap: usize) -> Vec<String> {
    chunk_text_with(text, &ChunkingConfig::new(target_words, overlap))
}

pub fn chunk_text_with(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let window = config.window();
    let step = config.step();
    if config.target_words == 0 || config.overlap >= config.target_words {
        warn!(
            target_words = config.target_words,
            overlap = config.overlap,
            step,
            "degenerate chunking parameters, clamping"
        );
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let end = (start + window).min(words.len());
        let chunk = words[start..end].join(" ");
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end >= words.len() {
            break;
        }
        start += step;
    }
    chunks
}
