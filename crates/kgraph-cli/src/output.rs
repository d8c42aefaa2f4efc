//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::pipeline::PipelineReport;
use colored::*;
use kgraph_domain::TextChunk;
use kgraph_extractor::{ChunkStatistics, FailedChunk};
use kgraph_gatekeeper::NormalizationStats;
use kgraph_graph::{GraphStatistics, NodeDegree, NodeInfo};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest chunk preview shown in tables, in characters.
const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format chunks and their statistics.
    pub fn format_chunks(&self, chunks: &[TextChunk], stats: &ChunkStatistics) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&json!({
                "chunks": chunks,
                "statistics": stats,
            }))?);
        }

        if chunks.is_empty() {
            return Ok(self.warning("No chunks produced (empty input)."));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Words", "Range", "Preview"]);
        for chunk in chunks {
            builder.push_record([
                chunk.chunk_number.to_string(),
                chunk.word_count.to_string(),
                format!("{}-{}", chunk.start_word, chunk.end_word),
                preview(&chunk.text),
            ]);
        }

        Ok(format!(
            "{}\n\n{}",
            self.render(builder),
            self.chunk_statistics_table(stats)
        ))
    }

    /// Format the report of a full pipeline run.
    pub fn format_report(&self, report: &PipelineReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let extraction = &report.extraction;
        let mut sections = vec![
            self.heading("Chunking"),
            self.chunk_statistics_table(&report.chunks),
            self.heading("Extraction"),
            self.key_values(&[
                ("Chunks processed", extraction.total_chunks.to_string()),
                ("Successful", extraction.successful_chunks.to_string()),
                ("Failed", extraction.failed_chunks.to_string()),
                ("Triples extracted", extraction.total_triples.to_string()),
                (
                    "Avg triples per chunk",
                    format!("{:.2}", extraction.avg_triples_per_chunk),
                ),
            ]),
        ];

        if !report.failed_chunks.is_empty() {
            sections.push(self.failed_chunks(&report.failed_chunks));
        }

        sections.push(self.heading("Normalization"));
        sections.push(self.normalization_table(&report.normalization));
        sections.push(self.heading("Graph"));
        sections.push(self.graph_statistics_table(&report.graph));
        sections.push(self.heading("Top nodes"));
        sections.push(self.top_nodes_table(&report.top_nodes));

        Ok(sections.join("\n\n"))
    }

    /// Format graph analytics for the `graph` command.
    pub fn format_graph_summary(
        &self,
        normalization: &NormalizationStats,
        stats: &GraphStatistics,
        top_nodes: &[NodeDegree],
    ) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&json!({
                "normalization": normalization,
                "graph": stats,
                "top_nodes": top_nodes,
            }))?);
        }

        Ok([
            self.heading("Normalization"),
            self.normalization_table(normalization),
            self.heading("Graph"),
            self.graph_statistics_table(stats),
            self.heading("Top nodes"),
            self.top_nodes_table(top_nodes),
        ]
        .join("\n\n"))
    }

    /// Format a single node's neighborhood.
    pub fn format_node_info(&self, info: &NodeInfo) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(info)?);
        }

        let summary = self.key_values(&[
            ("Node", info.node_id.clone()),
            ("Degree", info.degree.to_string()),
            ("In-degree", info.in_degree.to_string()),
            ("Out-degree", info.out_degree.to_string()),
        ]);

        let mut builder = Builder::default();
        builder.push_record(["Direction", "Peer", "Relation"]);
        for edge in &info.incoming {
            builder.push_record(["<-", edge.peer.as_str(), edge.relation.as_str()]);
        }
        for edge in &info.outgoing {
            builder.push_record(["->", edge.peer.as_str(), edge.relation.as_str()]);
        }

        Ok(format!("{}\n\n{}", summary, self.render(builder)))
    }

    /// Format the effective configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table => config.to_toml(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, title: &str) -> String {
        self.colorize(title, "cyan")
    }

    fn failed_chunks(&self, failed: &[FailedChunk]) -> String {
        failed
            .iter()
            .map(|chunk| self.warning(&format!("Chunk {}: {}", chunk.chunk_number, chunk.error)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn chunk_statistics_table(&self, stats: &ChunkStatistics) -> String {
        self.key_values(&[
            ("Total chunks", stats.total_chunks.to_string()),
            ("Total words", stats.total_words.to_string()),
            ("Avg words per chunk", format!("{:.1}", stats.avg_words_per_chunk)),
            ("Min words", stats.min_words.to_string()),
            ("Max words", stats.max_words.to_string()),
            ("Chunk size", stats.chunk_size.to_string()),
            ("Overlap", stats.overlap.to_string()),
        ])
    }

    fn normalization_table(&self, stats: &NormalizationStats) -> String {
        self.key_values(&[
            ("Original triples", stats.original_count.to_string()),
            ("Empty removed", stats.empty_removed.to_string()),
            ("Duplicates removed", stats.duplicates_removed.to_string()),
            ("Unique triples", stats.final_count.to_string()),
        ])
    }

    fn graph_statistics_table(&self, stats: &GraphStatistics) -> String {
        let mut rows = vec![
            ("Nodes", stats.num_nodes.to_string()),
            ("Edges", stats.num_edges.to_string()),
            ("Density", format!("{:.4}", stats.density)),
            ("Weakly connected", stats.is_connected.to_string()),
        ];
        if let Some(components) = stats.num_components {
            rows.push(("Components", components.to_string()));
        }
        if let Some(degree) = &stats.degree {
            rows.push(("Avg degree", format!("{:.2}", degree.average)));
            rows.push(("Min degree", degree.min.to_string()));
            rows.push(("Max degree", degree.max.to_string()));
        }
        self.key_values(&rows)
    }

    fn top_nodes_table(&self, top_nodes: &[NodeDegree]) -> String {
        if top_nodes.is_empty() {
            return self.warning("Graph is empty.");
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "Node", "Degree"]);
        for (rank, entry) in top_nodes.iter().enumerate() {
            builder.push_record([(rank + 1).to_string(), entry.node.clone(), entry.degree.to_string()]);
        }
        self.render(builder)
    }

    fn key_values(&self, rows: &[(&str, String)]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (key, value) in rows {
            builder.push_record([key.to_string(), value.clone()]);
        }
        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First characters of a chunk, with an ellipsis if cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_graph::{DegreeStats, NeighborEdge};

    fn chunks() -> Vec<TextChunk> {
        let words = ["marie", "curie", "discovered", "radium"];
        vec![TextChunk::from_words(1, &words, 0, 4)]
    }

    fn graph_stats() -> GraphStatistics {
        GraphStatistics {
            num_nodes: 2,
            num_edges: 1,
            density: 0.5,
            is_connected: true,
            num_components: None,
            degree: Some(DegreeStats {
                average: 1.0,
                min: 1,
                max: 1,
            }),
        }
    }

    #[test]
    fn test_chunks_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let chunks = chunks();
        let stats = ChunkStatistics::from_chunks(&chunks, 150, 30);

        let output = formatter.format_chunks(&chunks, &stats).unwrap();
        assert!(output.contains("Preview"));
        assert!(output.contains("marie curie discovered radium"));
        assert!(output.contains("Total chunks"));
    }

    #[test]
    fn test_chunks_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let chunks = chunks();
        let stats = ChunkStatistics::from_chunks(&chunks, 150, 30);

        let output = formatter.format_chunks(&chunks, &stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["chunks"][0]["end_word"], 3);
        assert_eq!(value["statistics"]["total_words"], 4);
    }

    #[test]
    fn test_empty_chunks() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stats = ChunkStatistics::from_chunks(&[], 150, 30);
        let output = formatter.format_chunks(&[], &stats).unwrap();
        assert!(output.contains("No chunks produced"));
    }

    #[test]
    fn test_graph_summary_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let top = vec![NodeDegree {
            node: "marie curie".to_string(),
            degree: 1,
        }];

        let output = formatter
            .format_graph_summary(&NormalizationStats::new(3, 1, 1), &graph_stats(), &top)
            .unwrap();

        assert!(output.contains("Unique triples"));
        assert!(output.contains("Density"));
        assert!(output.contains("marie curie"));
        assert!(!output.contains("Components"));
    }

    #[test]
    fn test_node_info_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let info = NodeInfo {
            node_id: "radium".to_string(),
            degree: 1,
            in_degree: 1,
            out_degree: 0,
            predecessors: vec!["marie curie".to_string()],
            successors: vec![],
            incoming: vec![NeighborEdge {
                peer: "marie curie".to_string(),
                relation: "discovered".to_string(),
            }],
            outgoing: vec![],
        };

        let output = formatter.format_node_info(&info).unwrap();
        assert!(output.contains("In-degree"));
        assert!(output.contains("discovered"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(80);
        let cut = preview(&text);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 1);
        assert!(cut.ends_with('…'));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
