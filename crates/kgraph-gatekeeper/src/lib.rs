//! kgraph Gatekeeper
//!
//! Quality control between the model and the graph.
//!
//! The Gatekeeper provides:
//! - Structural validation of candidate triples (required keys, string
//!   values, nothing blank)
//! - Normalization (case folding, trimming, predicate whitespace collapse)
//! - Corpus-wide exact-duplicate removal with first-seen provenance
//!
//! # Examples
//!
//! ```
//! use kgraph_gatekeeper::{normalize_and_deduplicate, TripleValidator};
//! use serde_json::json;
//!
//! let candidates = json!([
//!     {"subject": "Marie Curie", "predicate": "discovered", "object": "Radium"},
//!     {"subject": "marie curie", "predicate": "Discovered", "object": "radium"},
//!     {"subject": "", "predicate": "x", "object": "y"}
//! ]);
//!
//! let valid = TripleValidator::new().validate_all(&candidates, Some(1));
//! assert_eq!(valid.len(), 2);
//!
//! let corpus = normalize_and_deduplicate(&valid);
//! assert_eq!(corpus.triples.len(), 1);
//! assert_eq!(corpus.stats.duplicates_removed, 1);
//! ```

#![warn(missing_docs)]

mod normalizer;
mod validator;

pub use normalizer::{
    normalize_and_deduplicate, normalize_one, NormalizationStats, NormalizedCorpus,
    TripleFields, TripleIdentity, TripleNormalizer,
};
pub use validator::{RejectionReason, TripleValidator, ValidationReport, CHUNK_KEY, REQUIRED_KEYS};
