//! End-to-end pipeline: text to knowledge graph.

use crate::error::Result;
use kgraph_domain::traits::LlmProvider;
use kgraph_domain::NormalizedTriple;
use kgraph_extractor::{
    ChunkStatistics, ExtractionStatistics, ExtractorConfig, FailedChunk, TextChunker,
    TripleExtractor,
};
use kgraph_gatekeeper::{normalize_and_deduplicate, NormalizationStats};
use kgraph_graph::{
    to_visualization, GraphBuilder, GraphStatistics, KnowledgeGraph, NodeDegree,
    VisualizationData, VisualizationSettings,
};
use serde::Serialize;
use std::fmt::Display;
use tracing::info;

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Chunking summary
    pub chunks: ChunkStatistics,
    /// Extraction summary
    pub extraction: ExtractionStatistics,
    /// Chunks that contributed no triples because extraction failed
    pub failed_chunks: Vec<FailedChunk>,
    /// Normalization and deduplication counters
    pub normalization: NormalizationStats,
    /// Graph summary
    pub graph: GraphStatistics,
    /// Highest-degree nodes
    pub top_nodes: Vec<NodeDegree>,
}

/// Everything a pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Summary for display
    pub report: PipelineReport,
    /// Unique normalized triples, in first-seen order
    pub triples: Vec<NormalizedTriple>,
    /// The assembled graph
    pub graph: KnowledgeGraph,
    /// Renderer-ready node and edge lists
    pub visualization: VisualizationData,
}

/// Runs chunking, extraction, normalization and graph assembly in order.
pub struct Pipeline<L>
where
    L: LlmProvider,
{
    chunker: TextChunker,
    extractor: TripleExtractor<L>,
    builder: GraphBuilder,
    visualization: VisualizationSettings,
}

impl<L> Pipeline<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a pipeline.
    ///
    /// Fails if the chunking configuration is invalid.
    pub fn new(
        llm_provider: L,
        chunking: &ExtractorConfig,
        visualization: VisualizationSettings,
    ) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::from_config(chunking)?,
            extractor: TripleExtractor::new(llm_provider),
            builder: GraphBuilder::new(),
            visualization,
        })
    }

    /// The extractor, e.g. to inspect its provider.
    pub fn extractor(&self) -> &TripleExtractor<L> {
        &self.extractor
    }

    /// Process a document.
    ///
    /// Extraction failures are reported, never fatal; an empty document
    /// yields an empty graph.
    pub fn run(&mut self, text: &str, top_n: usize) -> PipelineOutput {
        let chunks = self.chunker.chunk(text);
        let chunk_stats = self.chunker.statistics(&chunks);
        info!(
            chunks = chunk_stats.total_chunks,
            words = chunk_stats.total_words,
            "Chunked document"
        );

        let raw = self.extractor.extract_all(&chunks);
        let corpus = normalize_and_deduplicate(&raw);
        let graph = self.builder.build(&corpus.triples);
        let visualization = to_visualization(&graph, &self.visualization);

        let report = PipelineReport {
            chunks: chunk_stats,
            extraction: *self.extractor.statistics(),
            failed_chunks: self.extractor.failed_chunks().to_vec(),
            normalization: corpus.stats,
            graph: graph.statistics(),
            top_nodes: graph.top_nodes(top_n),
        };

        PipelineOutput {
            report,
            triples: corpus.triples,
            graph,
            visualization,
        }
    }
}
