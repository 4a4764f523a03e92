//! lexrag-text
//!
//! In-memory keyword retrieval: TF x IDF scoring of a caller-owned chunk set,
//! with the document-frequency table rebuilt per call from the query's terms.

pub mod keyword;
pub mod tokenize;

pub use keyword::{
    retrieve_top_k_by_keyword, retrieve_top_k_by_keyword_scored, score_chunks_by_keyword, KeywordRanker,
};
pub use tokenize::{query_terms, split_words};
