use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lexrag_core::config::{expand_path, Config};
use lexrag_core::ingest::{ingest_file, list_text_files, IngestedDocument};
use lexrag_core::traits::Embedder;
use lexrag_core::{ChunkingConfig, Error, RetrievalMode};
use lexrag_hybrid::{retrieve_context_scored, Retriever};
use lexrag_vector::embed::DEFAULT_DIM;
use lexrag_vector::{attach_embeddings, HashingEmbedder};

mod store;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chunk documents and retrieve the passages relevant to a question", long_about = None)]
struct Cli {
    /// Directory holding config.toml and config.<env>.toml
    #[arg(long, default_value = ".")]
    config_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chunk a text file, or every .txt file below a directory
    Ingest {
        path: String,
        /// Write the chunk file here instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        #[arg(long)]
        target_words: Option<usize>,
        #[arg(long)]
        overlap: Option<usize>,
    },
    /// Rank the chunks of a chunk file against a question
    Query {
        chunks: String,
        query: String,
        #[arg(short = 'k', long = "top-k")]
        top_k: Option<usize>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Attach hashing embeddings to every chunk of a chunk file
    Embed {
        chunks: String,
        #[arg(short, long)]
        out: Option<String>,
        #[arg(long, default_value_t = DEFAULT_DIM)]
        dim: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Auto,
    Keyword,
    Vector,
}

impl From<ModeArg> for RetrievalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => RetrievalMode::Auto,
            ModeArg::Keyword => RetrievalMode::Keyword,
            ModeArg::Vector => RetrievalMode::Vector,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from(&expand_path(&cli.config_dir)).context("Error loading config")?;

    match cli.command {
        Command::Ingest { path, out, target_words, overlap } => {
            let mut chunking = config.chunking()?;
            if let Some(t) = target_words {
                chunking.target_words = t;
            }
            if let Some(o) = overlap {
                chunking.overlap = o;
            }
            let docs = ingest(&expand_path(&path), &chunking)?;
            let total: usize = docs.iter().map(|d| d.chunk_count).sum();
            info!(documents = docs.len(), chunks = total, "ingest complete");
            store::write_documents(&docs, out.map(expand_path).as_deref())?;
        }
        Command::Query { chunks, query, top_k, mode, json } => {
            let mut retrieval = config.retrieval()?;
            if let Some(k) = top_k {
                retrieval.keyword_k = k;
                retrieval.vector_k = k;
            }
            if let Some(mode) = mode {
                retrieval.mode = mode.into();
            }
            let (chunks, origins) = store::flatten(store::load_documents(&expand_path(&chunks))?);
            let embedder = query_embedder(&chunks)?;
            let retriever = Retriever::for_chunks(&retrieval, &chunks, embedder);
            let hits = retrieve_context_scored(&retriever, &query, &chunks)?;

            if json {
                let rows: Vec<serde_json::Value> = hits
                    .iter()
                    .map(|h| {
                        let origin = &origins[h.index];
                        serde_json::json!({
                            "index": h.index,
                            "file_name": origin.file_name,
                            "chunk_index": origin.chunk_index,
                            "score": h.score,
                            "source": h.source,
                            "text": h.chunk.text(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("🔍 {} results for: \"{}\" ({:?}, k={})", hits.len(), query, retriever.kind(), retriever.k());
                for (rank, h) in hits.iter().enumerate() {
                    let origin = &origins[h.index];
                    println!("\n  {}. score={:.4}  {}#{}", rank + 1, h.score, origin.file_name, origin.chunk_index);
                    println!("     {}", h.chunk.text());
                }
            }
        }
        Command::Embed { chunks, out, dim } => {
            let embedder = HashingEmbedder::new(dim)?;
            let mut docs = store::load_documents(&expand_path(&chunks))?;
            for doc in &mut docs {
                doc.chunks = attach_embeddings(&doc.chunks, &embedder)?;
            }
            store::write_documents(&docs, out.map(expand_path).as_deref())?;
        }
    }
    Ok(())
}

fn ingest(path: &Path, chunking: &ChunkingConfig) -> Result<Vec<IngestedDocument>> {
    if path.is_file() {
        return Ok(vec![ingest_file(path, chunking)?]);
    }
    let files: Vec<PathBuf> = list_text_files(path);
    if files.is_empty() {
        warn!(path = %path.display(), "no .txt files found");
        return Ok(vec![]);
    }
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
            .progress_chars("#>-"),
    );
    let mut docs = Vec::new();
    for file in &files {
        pb.set_message(file.display().to_string());
        match ingest_file(file, chunking) {
            Ok(doc) => docs.push(doc),
            Err(Error::EmptyText(name)) => warn!(file = %name, "skipping document without text"),
            Err(e) => return Err(e).with_context(|| format!("Failed to ingest {}", file.display())),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(docs)
}

/// A hashing embedder matching the dimension of the stored embeddings, if any.
fn query_embedder(chunks: &[lexrag_core::Chunk]) -> Result<Option<Arc<dyn Embedder>>> {
    let dim = chunks.iter().find_map(|c| c.embedding().filter(|e| !e.is_empty()).map(<[f32]>::len));
    Ok(match dim {
        Some(dim) => {
            let embedder: Arc<dyn Embedder> = Arc::new(HashingEmbedder::new(dim)?);
            Some(embedder)
        }
        None => None,
    })
}
