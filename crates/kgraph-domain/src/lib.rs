//! kgraph Domain Layer
//!
//! This crate contains the data model shared by every stage of the
//! prose-to-knowledge-graph pipeline, and the trait seam behind which the
//! language model lives.
//!
//! ## Key Concepts
//!
//! - **TextChunk**: an overlapping word window cut from the source document
//! - **ValidatedTriple**: a structurally sound Subject-Predicate-Object triple
//!   as returned by the model, stamped with the chunk it came from
//! - **NormalizedTriple**: a case-folded, whitespace-normalized triple; the
//!   unit of corpus-wide deduplication and graph insertion
//! - **SourceChunk**: provenance of a normalized triple
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations (LLM transport) live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod traits;
pub mod triple;

// Re-exports for convenience
pub use chunk::TextChunk;
pub use traits::{LlmProvider, ResponseFormat};
pub use triple::{NormalizedTriple, SourceChunk, ValidatedTriple};
