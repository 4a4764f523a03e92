use std::collections::{HashMap, HashSet};
use tracing::debug;

use lexrag_core::rank::{into_chunks, top_k};
use lexrag_core::traits::ChunkRanker;
use lexrag_core::{Chunk, ScoredChunk, SourceKind};

use crate::tokenize::{query_terms, split_words};

/// Score every chunk against `query`, in input order.
///
/// Returns `None` when the query has no usable terms. The IDF of a term is
/// `ln((N + 1) / df)` where `df` counts the chunks containing it; a term
/// repeated in the query is counted once per occurrence, in both `df` and the
/// score sum.
pub fn score_chunks_by_keyword(query: &str, chunks: &[Chunk]) -> Option<Vec<f64>> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return None;
    }
    Some(score_terms(&terms, chunks))
}

fn score_terms(terms: &[String], chunks: &[Chunk]) -> Vec<f64> {
    let tokenized: Vec<Vec<String>> = chunks.iter().map(|c| split_words(c.text())).collect();
    let doc_freq = document_frequencies(terms, &tokenized);
    let n = chunks.len() as f64;

    tokenized
        .iter()
        .map(|words| {
            let word_count = words.len().max(1) as f64;
            let term_freq = term_counts(words);
            terms
                .iter()
                .map(|term| {
                    let tf = term_freq.get(term.as_str()).copied().unwrap_or(0) as f64 / word_count;
                    let idf = match doc_freq.get(term.as_str()) {
                        Some(&df) if df > 0 => ((n + 1.0) / df as f64).ln(),
                        _ => 0.0,
                    };
                    tf * idf
                })
                .sum::<f64>()
        })
        .collect()
}

fn document_frequencies<'t>(terms: &'t [String], tokenized: &[Vec<String>]) -> HashMap<&'t str, usize> {
    let mut doc_freq = HashMap::new();
    for words in tokenized {
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        for term in terms {
            if distinct.contains(term.as_str()) {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
    }
    doc_freq
}

fn term_counts(words: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for w in words {
        *counts.entry(w.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Rank `chunks` by TF-IDF against `query` and keep the best `k`.
///
/// A query without usable terms returns the first `k` chunks unscored.
/// Zero-score chunks still fill the result when fewer than `k` chunks match.
pub fn retrieve_top_k_by_keyword_scored<'a>(query: &str, chunks: &'a [Chunk], k: usize) -> Vec<ScoredChunk<'a>> {
    if k == 0 || chunks.is_empty() {
        return Vec::new();
    }
    let hit = |(index, chunk): (usize, &'a Chunk), score: f64| ScoredChunk { chunk, index, score, source: SourceKind::Keyword };

    let Some(scores) = score_chunks_by_keyword(query, chunks) else {
        debug!(k, "query has no usable terms, returning leading chunks");
        return chunks.iter().enumerate().take(k).map(|c| hit(c, 0.0)).collect();
    };
    let matched = scores.iter().filter(|s| **s > 0.0).count();
    debug!(chunks = chunks.len(), matched, k, "keyword scoring");
    let hits = chunks.iter().enumerate().zip(scores).map(|(c, score)| hit(c, score)).collect();
    top_k(hits, k)
}

pub fn retrieve_top_k_by_keyword<'a>(query: &str, chunks: &'a [Chunk], k: usize) -> Vec<&'a Chunk> {
    into_chunks(retrieve_top_k_by_keyword_scored(query, chunks, k))
}

/// [`ChunkRanker`] over the keyword path. Infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRanker;

impl ChunkRanker for KeywordRanker {
    fn rank<'a>(&self, query: &str, chunks: &'a [Chunk], k: usize) -> lexrag_core::Result<Vec<ScoredChunk<'a>>> {
        Ok(retrieve_top_k_by_keyword_scored(query, chunks, k))
    }
}
