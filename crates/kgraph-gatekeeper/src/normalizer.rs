//! Normalization and corpus-wide deduplication of triples
//!
//! The core is a pair of pure functions: [`normalize_one`] for a single
//! triple and [`normalize_and_deduplicate`] for a whole corpus, which returns
//! the surviving triples together with its counters. [`TripleNormalizer`]
//! wraps them for callers that prefer an object holding the last pass's
//! state.

use kgraph_domain::{NormalizedTriple, SourceChunk, ValidatedTriple};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Dedup identity of a normalized triple
pub type TripleIdentity = (String, String, String);

/// Read access to the parts of a triple the normalizer needs
///
/// Returning `None` from a field accessor means the field is missing or not
/// a string, which rejects the triple.
pub trait TripleFields {
    /// Subject text
    fn subject(&self) -> Option<&str>;

    /// Predicate text
    fn predicate(&self) -> Option<&str>;

    /// Object text
    fn object(&self) -> Option<&str>;

    /// Chunk provenance
    fn source_chunk(&self) -> SourceChunk;
}

impl TripleFields for ValidatedTriple {
    fn subject(&self) -> Option<&str> {
        Some(&self.subject)
    }

    fn predicate(&self) -> Option<&str> {
        Some(&self.predicate)
    }

    fn object(&self) -> Option<&str> {
        Some(&self.object)
    }

    fn source_chunk(&self) -> SourceChunk {
        self.chunk.into()
    }
}

impl TripleFields for NormalizedTriple {
    fn subject(&self) -> Option<&str> {
        Some(&self.subject)
    }

    fn predicate(&self) -> Option<&str> {
        Some(&self.predicate)
    }

    fn object(&self) -> Option<&str> {
        Some(&self.object)
    }

    fn source_chunk(&self) -> SourceChunk {
        self.source_chunk
    }
}

/// Untyped triples, e.g. loaded from a JSON file
///
/// Provenance is read from `chunk`, falling back to `source_chunk`.
impl TripleFields for Value {
    fn subject(&self) -> Option<&str> {
        self.get("subject").and_then(Value::as_str)
    }

    fn predicate(&self) -> Option<&str> {
        self.get("predicate").and_then(Value::as_str)
    }

    fn object(&self) -> Option<&str> {
        self.get("object").and_then(Value::as_str)
    }

    fn source_chunk(&self) -> SourceChunk {
        self.get("chunk")
            .or_else(|| self.get("source_chunk"))
            .and_then(Value::as_u64)
            .map_or(SourceChunk::Unknown, |n| SourceChunk::Chunk(n as usize))
    }
}

/// Counters from one corpus pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NormalizationStats {
    /// Triples handed to the pass
    pub original_count: usize,

    /// Triples dropped because a field was missing, non-string or empty
    pub empty_removed: usize,

    /// Triples dropped because an identical triple was already kept
    pub duplicates_removed: usize,

    /// Triples kept
    pub final_count: usize,
}

impl NormalizationStats {
    /// Derive the final count from the original count and the two counters
    pub fn new(original_count: usize, empty_removed: usize, duplicates_removed: usize) -> Self {
        Self {
            original_count,
            empty_removed,
            duplicates_removed,
            final_count: original_count.saturating_sub(empty_removed + duplicates_removed),
        }
    }
}

/// Output of a corpus pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedCorpus {
    /// Unique normalized triples in first-seen order
    pub triples: Vec<NormalizedTriple>,

    /// Counters for the pass
    pub stats: NormalizationStats,
}

/// Lowercase and trim
fn normalize_entity(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lowercase, trim, and collapse whitespace runs to a single space
fn normalize_predicate(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a single triple
///
/// Returns `None` if any field is missing, not a string, or empty after
/// normalization. Applying it to its own output is a no-op.
///
/// # Examples
///
/// ```
/// use kgraph_gatekeeper::normalize_one;
/// use kgraph_domain::ValidatedTriple;
///
/// let triple = ValidatedTriple::new("  Marie Curie ", "Was   Born\tIn", "Warsaw").with_chunk(1);
/// let normalized = normalize_one(&triple).unwrap();
/// assert_eq!(normalized.subject, "marie curie");
/// assert_eq!(normalized.predicate, "was born in");
/// assert_eq!(normalized.object, "warsaw");
/// ```
pub fn normalize_one<T: TripleFields + ?Sized>(triple: &T) -> Option<NormalizedTriple> {
    let subject = normalize_entity(triple.subject()?);
    let predicate = normalize_predicate(triple.predicate()?);
    let object = normalize_entity(triple.object()?);

    if subject.is_empty() || predicate.is_empty() || object.is_empty() {
        return None;
    }

    Some(NormalizedTriple {
        subject,
        predicate,
        object,
        source_chunk: triple.source_chunk(),
    })
}

/// Normalize a whole corpus and drop exact duplicates
///
/// Must run over every triple of the document at once: deduplication is
/// corpus-wide and the first occurrence (with its provenance) is the one
/// kept.
pub fn normalize_and_deduplicate<T: TripleFields>(triples: &[T]) -> NormalizedCorpus {
    let mut seen: HashSet<TripleIdentity> = HashSet::new();
    deduplicate_into(triples, &mut seen)
}

fn deduplicate_into<T: TripleFields>(
    triples: &[T],
    seen: &mut HashSet<TripleIdentity>,
) -> NormalizedCorpus {
    let mut kept = Vec::with_capacity(triples.len());
    let mut empty_removed = 0;
    let mut duplicates_removed = 0;

    for triple in triples {
        let Some(normalized) = normalize_one(triple) else {
            empty_removed += 1;
            continue;
        };

        let identity = (
            normalized.subject.clone(),
            normalized.predicate.clone(),
            normalized.object.clone(),
        );

        if !seen.insert(identity) {
            duplicates_removed += 1;
            continue;
        }

        kept.push(normalized);
    }

    tracing::info!(
        original = triples.len(),
        empty_removed,
        duplicates_removed,
        kept = kept.len(),
        "Normalized triple corpus"
    );

    NormalizedCorpus {
        triples: kept,
        stats: NormalizationStats::new(triples.len(), empty_removed, duplicates_removed),
    }
}

/// Stateful facade over [`normalize_and_deduplicate`]
///
/// Holds the seen-set and counters of the most recent pass. Every pass
/// starts from a clean state, so nothing leaks between runs.
#[derive(Debug, Default)]
pub struct TripleNormalizer {
    seen: HashSet<TripleIdentity>,
    empty_removed: usize,
    duplicates_removed: usize,
}

impl TripleNormalizer {
    /// Create a normalizer with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a corpus pass, replacing any state from a previous pass
    pub fn normalize_and_deduplicate<T: TripleFields>(
        &mut self,
        triples: &[T],
    ) -> Vec<NormalizedTriple> {
        self.reset();
        let corpus = deduplicate_into(triples, &mut self.seen);
        self.empty_removed = corpus.stats.empty_removed;
        self.duplicates_removed = corpus.stats.duplicates_removed;
        corpus.triples
    }

    /// Counters of the last pass, given the pre-normalization count
    pub fn statistics(&self, original_count: usize) -> NormalizationStats {
        NormalizationStats::new(original_count, self.empty_removed, self.duplicates_removed)
    }

    /// Whether the last pass kept a triple with this identity
    pub fn has_seen(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.seen
            .contains(&(subject.to_string(), predicate.to_string(), object.to_string()))
    }

    /// Clear the seen-set and both counters
    pub fn reset(&mut self) {
        self.seen.clear();
        self.empty_removed = 0;
        self.duplicates_removed = 0;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalizing a normalized triple changes nothing
        #[test]
        fn test_normalization_idempotent(
            s in "[ \\tA-Za-z]{0,12}",
            p in "[ \\tA-Za-z]{0,12}",
            o in "[ \\tA-Za-z]{0,12}",
        ) {
            let raw = ValidatedTriple::new(s, p, o);
            if let Some(once) = normalize_one(&raw) {
                prop_assert_eq!(normalize_one(&once), Some(once.clone()));
            }
        }

        /// Property: a second corpus pass removes nothing
        #[test]
        fn test_dedup_idempotent(words in proptest::collection::vec("[A-Ca-c ]{1,4}", 0..30)) {
            let triples: Vec<ValidatedTriple> = words
                .chunks(3)
                .filter(|c| c.len() == 3)
                .map(|c| ValidatedTriple::new(c[0].clone(), c[1].clone(), c[2].clone()))
                .collect();

            let first = normalize_and_deduplicate(&triples);
            let second = normalize_and_deduplicate(&first.triples);

            prop_assert_eq!(&first.triples, &second.triples);
            prop_assert_eq!(second.stats.final_count, first.stats.final_count);
        }
    }
}
