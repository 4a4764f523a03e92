use std::sync::Arc;

use lexrag_core::config::RetrievalConfig;
use lexrag_core::ingest::ingest_document;
use lexrag_core::traits::Embedder;
use lexrag_core::{ChunkingConfig, RetrievalMode, SourceKind};
use lexrag_hybrid::{retrieve_context, retrieve_context_scored, Retriever};
use lexrag_vector::{attach_embeddings, HashingEmbedder};

const NOTES: &str = "Cells are the basic unit of life. The mitochondria produce energy for the cell. \
Photosynthesis happens in chloroplasts and turns light into chemical energy. \
Newton's laws describe motion: inertia, acceleration and reaction. \
The French Revolution began in 1789 and reshaped European politics.";

fn config(mode: RetrievalMode) -> RetrievalConfig {
    RetrievalConfig { mode, ..RetrievalConfig::default() }
}

fn embedder() -> Arc<dyn Embedder> {
    Arc::new(HashingEmbedder::default())
}

#[test]
fn auto_mode_uses_keywords_for_plain_chunks() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let retriever = Retriever::for_chunks(&config(RetrievalMode::Auto), &doc.chunks, Some(embedder()));
    assert_eq!(retriever.kind(), SourceKind::Keyword);
    assert_eq!(retriever.k(), 5);

    let context = retrieve_context(&retriever, "What do chloroplasts do?", &doc.chunks).unwrap();
    assert!(!context.is_empty() && context.len() <= 5);
    assert!(context[0].text().contains("chloroplasts"));
}

#[test]
fn auto_mode_uses_vectors_once_chunks_are_embedded() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let embedder = embedder();
    let chunks = attach_embeddings(&doc.chunks, embedder.as_ref()).unwrap();

    let retriever = Retriever::for_chunks(&config(RetrievalMode::Auto), &chunks, Some(embedder));
    assert_eq!(retriever.kind(), SourceKind::Vector);
    assert_eq!(retriever.k(), 4);

    let hits = retriever.rank_scored("french revolution 1789", &chunks).unwrap();
    assert!(hits.len() <= 4);
    assert!(hits.iter().all(|h| h.source == SourceKind::Vector));
    assert!(hits[0].chunk.text().contains("1789"));
}

#[test]
fn auto_mode_without_embedder_uses_keywords() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let chunks = attach_embeddings(&doc.chunks, &HashingEmbedder::default()).unwrap();
    let retriever = Retriever::for_chunks(&config(RetrievalMode::Auto), &chunks, None);
    assert_eq!(retriever.kind(), SourceKind::Keyword);
}

#[test]
fn forced_modes() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let embedded = attach_embeddings(&doc.chunks, &HashingEmbedder::default()).unwrap();

    let keyword = Retriever::for_chunks(&config(RetrievalMode::Keyword), &embedded, Some(embedder()));
    assert_eq!(keyword.kind(), SourceKind::Keyword);

    // no embedded chunks: vector mode cannot run
    let fallback = Retriever::for_chunks(&config(RetrievalMode::Vector), &doc.chunks, Some(embedder()));
    assert_eq!(fallback.kind(), SourceKind::Keyword);

    let vector = Retriever::for_chunks(&config(RetrievalMode::Vector), &embedded, Some(embedder()));
    assert_eq!(vector.kind(), SourceKind::Vector);
}

#[test]
fn context_gate_skips_blank_queries_and_empty_sets() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let retriever = Retriever::keyword(3);
    assert!(retrieve_context(&retriever, "   ", &doc.chunks).unwrap().is_empty());
    assert!(retrieve_context(&retriever, "energy", &[]).unwrap().is_empty());

    // punctuation-only but non-blank still gets the positional fallback
    let fallback = retrieve_context(&retriever, "??", &doc.chunks).unwrap();
    assert_eq!(fallback.len(), 3);
    for (got, want) in fallback.iter().zip(&doc.chunks) {
        assert!(std::ptr::eq(*got, want));
    }
}

#[test]
fn scored_context_reports_positions() {
    let doc = ingest_document("notes.txt", NOTES, &ChunkingConfig::new(12, 4)).unwrap();
    let retriever = Retriever::keyword(2);
    let hits = retrieve_context_scored(&retriever, "Newton inertia", &doc.chunks).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].score > 0.0);
    assert!(std::ptr::eq(hits[0].chunk, &doc.chunks[hits[0].index]));
    assert!(retrieve_context_scored(&retriever, "", &doc.chunks).unwrap().is_empty());
}
