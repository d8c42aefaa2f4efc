//! kgraph Extractor
//!
//! Turns prose into validated Subject-Predicate-Object triples using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Text → TextChunker → chunks → TripleExtractor → LLM → recovery → TripleValidator
//! ```
//!
//! # Key Features
//!
//! - **Overlapping windows**: fixed-size word windows so relations that span a
//!   window boundary are seen whole at least once
//! - **Tolerant recovery**: bare arrays, single-array objects and padded
//!   arrays are all accepted from the model
//! - **Failure isolation**: a failed chunk is logged and skipped, never fatal
//!
//! # Example Usage
//!
//! ```
//! use kgraph_extractor::{TextChunker, TripleExtractor};
//! use kgraph_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"[{"subject": "marie curie", "predicate": "discovered", "object": "radium"}]"#);
//! let chunker = TextChunker::new(150, 30).unwrap();
//! let chunks = chunker.chunk("Marie Curie discovered radium.");
//!
//! let mut extractor = TripleExtractor::new(llm);
//! let triples = extractor.extract_all(&chunks);
//!
//! assert_eq!(triples.len(), 1);
//! assert_eq!(triples[0].chunk, Some(1));
//! assert_eq!(extractor.statistics().successful_chunks, 1);
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
pub mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{ChunkStatistics, TextChunker};
pub use config::{ExtractorConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
pub use error::ExtractorError;
pub use extractor::TripleExtractor;
pub use parser::{recover_candidates, RecoveredCandidates, RecoveryFailure, RecoveryPath};
pub use prompt::PromptBuilder;
pub use types::{
    ChunkOutcome, ExtractionStatistics, FailedChunk, EXTRACTION_ERROR_PREFIX, JSON_PARSING_FAILED,
};
