//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kgraph - Turn prose into a knowledge graph with an LLM.
#[derive(Debug, Parser)]
#[command(name = "kgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: chunk, extract, normalize, build the graph
    Build(BuildArgs),

    /// Split a text file into overlapping chunks
    Chunk(ChunkArgs),

    /// Build and analyze a graph from a saved triple list
    Graph(GraphArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Chunking overrides shared by `build` and `chunk`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ChunkingOverrides {
    /// Words per chunk
    #[arg(long, env = "CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Words shared by consecutive chunks
    #[arg(long, env = "CHUNK_OVERLAP")]
    pub overlap: Option<usize>,
}

/// Model overrides for `build`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LlmOverrides {
    /// Model name
    #[arg(short, long, env = "LLM_MODEL_NAME")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, env = "LLM_TEMPERATURE")]
    pub temperature: Option<f32>,

    /// Maximum tokens per reply
    #[arg(long, env = "LLM_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// API base URL
    #[arg(long, env = "OPENAI_API_BASE")]
    pub base_url: Option<String>,
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Text file to process
    pub file: PathBuf,

    /// Write visualization data (nodes and edges) to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the normalized, deduplicated triples to this JSON file
    #[arg(long)]
    pub triples_out: Option<PathBuf>,

    /// Number of top nodes to report
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub chunking: ChunkingOverrides,

    #[command(flatten)]
    pub llm: LlmOverrides,
}

/// Arguments for the chunk command.
#[derive(Debug, Parser)]
pub struct ChunkArgs {
    /// Text file to split
    pub file: PathBuf,

    #[command(flatten)]
    pub chunking: ChunkingOverrides,
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// JSON file holding an array of triples
    pub triples: PathBuf,

    /// Describe a single node instead of the whole graph
    #[arg(short, long)]
    pub node: Option<String>,

    /// Number of top nodes to report
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    /// Write visualization data (nodes and edges) to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ChunkingOverrides {
    /// Overwrite the configured values with any given on the command line.
    pub fn apply(&self, chunking: &mut kgraph_extractor::ExtractorConfig) {
        if let Some(chunk_size) = self.chunk_size {
            chunking.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            chunking.overlap = overlap;
        }
    }
}

impl LlmOverrides {
    /// Overwrite the configured values with any given on the command line.
    pub fn apply(&self, llm: &mut crate::config::LlmSettings) {
        if let Some(model) = &self.model {
            llm.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            llm.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            llm.max_tokens = max_tokens;
        }
        if let Some(base_url) = &self.base_url {
            llm.base_url = base_url.clone();
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
