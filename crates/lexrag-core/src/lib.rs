#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod chunker;
pub mod config;
pub mod error;
pub mod ingest;
pub mod rank;
pub mod traits;
pub mod types;

pub use chunker::{chunk_text, chunk_text_with, ChunkingConfig};
pub use error::{Error, Result};
pub use types::{Chunk, RetrievalMode, ScoredChunk, SourceKind};
