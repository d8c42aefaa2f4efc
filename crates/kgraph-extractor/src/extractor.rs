//! Core Extractor implementation

use crate::parser::recover_candidates;
use crate::prompt::PromptBuilder;
use crate::types::{ChunkOutcome, ExtractionStatistics, FailedChunk};
use kgraph_domain::traits::{LlmProvider, ResponseFormat};
use kgraph_domain::{TextChunk, ValidatedTriple};
use kgraph_gatekeeper::TripleValidator;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// The Extractor turns text chunks into validated triples, one model call
/// per chunk
///
/// Failures never abort a run: a chunk whose call fails or whose reply
/// cannot be recovered is logged in [`failed_chunks`](Self::failed_chunks)
/// and skipped.
pub struct TripleExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    validator: TripleValidator,
    failed_chunks: Vec<FailedChunk>,
    statistics: ExtractionStatistics,
}

impl<L> TripleExtractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L) -> Self {
        Self {
            llm_provider,
            validator: TripleValidator::new(),
            failed_chunks: Vec::new(),
            statistics: ExtractionStatistics::default(),
        }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Extract triples from a single chunk
    ///
    /// Failures are appended to the failed-chunk log as well as returned.
    pub fn extract_chunk(&mut self, chunk: &TextChunk) -> ChunkOutcome {
        let outcome = self.run_chunk(chunk);

        if let ChunkOutcome::Failure(failed) = &outcome {
            warn!(
                chunk = failed.chunk_number,
                error = %failed.error,
                "Chunk extraction failed"
            );
            self.failed_chunks.push(failed.clone());
        }

        outcome
    }

    /// Extract triples from every chunk, in order
    ///
    /// Clears the failed-chunk log first and records the run's statistics.
    pub fn extract_all(&mut self, chunks: &[TextChunk]) -> Vec<ValidatedTriple> {
        self.failed_chunks.clear();

        info!(chunks = chunks.len(), "Starting extraction");

        let outcomes: Vec<ChunkOutcome> = chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| {
                debug!("Processing chunk {}/{}", idx + 1, chunks.len());
                self.extract_chunk(chunk)
            })
            .collect();

        self.statistics = ExtractionStatistics::from_outcomes(&outcomes);

        info!(
            "Extraction complete: {} triples from {} chunks, {} failed",
            self.statistics.total_triples,
            self.statistics.total_chunks,
            self.statistics.failed_chunks
        );

        outcomes
            .into_iter()
            .flat_map(ChunkOutcome::into_triples)
            .collect()
    }

    /// Failures of the current run, in chunk order
    pub fn failed_chunks(&self) -> &[FailedChunk] {
        &self.failed_chunks
    }

    /// Statistics of the last [`extract_all`](Self::extract_all) run
    pub fn statistics(&self) -> &ExtractionStatistics {
        &self.statistics
    }

    fn run_chunk(&self, chunk: &TextChunk) -> ChunkOutcome {
        let (system_prompt, user_prompt) = PromptBuilder::for_chunk(&chunk.text);

        debug!(
            chunk = chunk.chunk_number,
            "Prompt length: {} chars",
            system_prompt.len() + user_prompt.len()
        );

        let raw_response = match self.llm_provider.chat_structured(
            &system_prompt,
            &user_prompt,
            ResponseFormat::JsonObject,
        ) {
            Ok(reply) => reply,
            Err(e) => return ChunkOutcome::Failure(FailedChunk::errored(chunk.chunk_number, e)),
        };

        debug!(
            chunk = chunk.chunk_number,
            "LLM response length: {} chars",
            raw_response.len()
        );

        let recovered = match recover_candidates(&raw_response) {
            Ok(recovered) => recovered,
            Err(reason) => {
                debug!(chunk = chunk.chunk_number, %reason, "Could not recover candidates");
                return ChunkOutcome::Failure(FailedChunk::unparseable(
                    chunk.chunk_number,
                    raw_response,
                ));
            }
        };

        debug!(
            chunk = chunk.chunk_number,
            path = ?recovered.path,
            "Recovered {} candidates",
            recovered.candidates.len()
        );

        let candidates = serde_json::Value::Array(recovered.candidates);
        let triples = self
            .validator
            .validate_all(&candidates, Some(chunk.chunk_number));

        ChunkOutcome::Success {
            chunk_number: chunk.chunk_number,
            triples,
            raw_response,
        }
    }
}
