//! Per-chunk outcomes and run statistics

use kgraph_domain::ValidatedTriple;
use serde::Serialize;

/// Error label recorded when no candidate list could be recovered
pub const JSON_PARSING_FAILED: &str = "JSON parsing failed";

/// Prefix of the error label recorded for prompt or transport failures
pub const EXTRACTION_ERROR_PREFIX: &str = "Extraction error: ";

/// A chunk whose extraction failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedChunk {
    /// Number of the failed chunk
    pub chunk_number: usize,

    /// Model reply, if one was received
    pub raw_response: Option<String>,

    /// Error label
    pub error: String,
}

impl FailedChunk {
    /// The model replied but nothing could be recovered from the reply
    pub fn unparseable(chunk_number: usize, raw_response: String) -> Self {
        Self {
            chunk_number,
            raw_response: Some(raw_response),
            error: JSON_PARSING_FAILED.to_string(),
        }
    }

    /// Prompt construction or the model call failed
    pub fn errored(chunk_number: usize, message: impl std::fmt::Display) -> Self {
        Self {
            chunk_number,
            raw_response: None,
            error: format!("{}{}", EXTRACTION_ERROR_PREFIX, message),
        }
    }
}

/// Result of extracting one chunk
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// A candidate list was recovered and validated
    ///
    /// `triples` may be empty if every candidate was rejected.
    Success {
        /// Number of the chunk
        chunk_number: usize,
        /// Valid triples, stamped with the chunk number
        triples: Vec<ValidatedTriple>,
        /// Model reply
        raw_response: String,
    },

    /// Extraction failed; the chunk contributes no triples
    Failure(FailedChunk),
}

impl ChunkOutcome {
    /// Number of the chunk this outcome belongs to
    pub fn chunk_number(&self) -> usize {
        match self {
            ChunkOutcome::Success { chunk_number, .. } => *chunk_number,
            ChunkOutcome::Failure(failed) => failed.chunk_number,
        }
    }

    /// Valid triples; empty for failures
    pub fn triples(&self) -> &[ValidatedTriple] {
        match self {
            ChunkOutcome::Success { triples, .. } => triples,
            ChunkOutcome::Failure(_) => &[],
        }
    }

    /// Consume the outcome, keeping its triples
    pub fn into_triples(self) -> Vec<ValidatedTriple> {
        match self {
            ChunkOutcome::Success { triples, .. } => triples,
            ChunkOutcome::Failure(_) => Vec::new(),
        }
    }

    /// Model reply, if one was received
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ChunkOutcome::Success { raw_response, .. } => Some(raw_response),
            ChunkOutcome::Failure(failed) => failed.raw_response.as_deref(),
        }
    }

    /// Error label for failures
    pub fn error(&self) -> Option<&str> {
        match self {
            ChunkOutcome::Success { .. } => None,
            ChunkOutcome::Failure(failed) => Some(&failed.error),
        }
    }

    /// Whether the chunk failed
    pub fn is_failure(&self) -> bool {
        matches!(self, ChunkOutcome::Failure(_))
    }
}

/// Summary of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExtractionStatistics {
    /// Chunks processed
    pub total_chunks: usize,

    /// Chunks that failed
    pub failed_chunks: usize,

    /// Chunks that succeeded
    pub successful_chunks: usize,

    /// Valid triples extracted across all chunks
    pub total_triples: usize,

    /// Mean triples per successful chunk (0 when none succeeded)
    pub avg_triples_per_chunk: f64,
}

impl ExtractionStatistics {
    /// Fold a list of outcomes into run statistics
    pub fn from_outcomes(outcomes: &[ChunkOutcome]) -> Self {
        let (failed, triples) = outcomes.iter().fold((0, 0), |(failed, triples), outcome| {
            (
                failed + usize::from(outcome.is_failure()),
                triples + outcome.triples().len(),
            )
        });
        let successful = outcomes.len() - failed;

        Self {
            total_chunks: outcomes.len(),
            failed_chunks: failed,
            successful_chunks: successful,
            total_triples: triples,
            avg_triples_per_chunk: if successful > 0 {
                triples as f64 / successful as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(chunk_number: usize, n: usize) -> ChunkOutcome {
        ChunkOutcome::Success {
            chunk_number,
            triples: (0..n)
                .map(|i| ValidatedTriple::new(format!("s{}", i), "p", "o").with_chunk(chunk_number))
                .collect(),
            raw_response: "[]".to_string(),
        }
    }

    #[test]
    fn test_failure_labels() {
        let unparseable = FailedChunk::unparseable(2, "oops".to_string());
        assert_eq!(unparseable.error, "JSON parsing failed");
        assert_eq!(unparseable.raw_response.as_deref(), Some("oops"));

        let errored = FailedChunk::errored(3, "Rate limit exceeded");
        assert_eq!(errored.error, "Extraction error: Rate limit exceeded");
        assert!(errored.raw_response.is_none());
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = success(1, 2);
        assert_eq!(ok.chunk_number(), 1);
        assert_eq!(ok.triples().len(), 2);
        assert_eq!(ok.raw_response(), Some("[]"));
        assert!(ok.error().is_none());

        let failed = ChunkOutcome::Failure(FailedChunk::errored(4, "boom"));
        assert_eq!(failed.chunk_number(), 4);
        assert!(failed.triples().is_empty());
        assert!(failed.raw_response().is_none());
        assert_eq!(failed.error(), Some("Extraction error: boom"));
        assert!(failed.into_triples().is_empty());
    }

    #[test]
    fn test_statistics_average_over_successful_chunks() {
        let outcomes = vec![
            success(1, 3),
            ChunkOutcome::Failure(FailedChunk::unparseable(2, "x".to_string())),
            success(3, 1),
            success(4, 0),
        ];

        let stats = ExtractionStatistics::from_outcomes(&outcomes);

        assert_eq!(stats.total_chunks, 4);
        assert_eq!(stats.failed_chunks, 1);
        assert_eq!(stats.successful_chunks, 3);
        assert_eq!(stats.total_triples, 4);
        assert!((stats.avg_triples_per_chunk - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_statistics_all_failed() {
        let outcomes = vec![ChunkOutcome::Failure(FailedChunk::errored(1, "down"))];
        let stats = ExtractionStatistics::from_outcomes(&outcomes);

        assert_eq!(stats.successful_chunks, 0);
        assert_eq!(stats.avg_triples_per_chunk, 0.0);
    }

    #[test]
    fn test_statistics_empty() {
        assert_eq!(
            ExtractionStatistics::from_outcomes(&[]),
            ExtractionStatistics::default()
        );
    }
}
