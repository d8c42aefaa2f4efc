//! Build command implementation.

use super::write_file;
use crate::cli::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{Pipeline, PipelineOutput};
use kgraph_domain::LlmProvider;
use kgraph_llm::OpenAiProvider;
use std::fmt::Display;
use std::fs;
use tracing::info;

/// Execute the build command against the configured OpenAI-compatible endpoint.
pub fn execute_build(args: BuildArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut config = config.clone();
    args.chunking.apply(&mut config.chunking);
    args.llm.apply(&mut config.llm);
    config.validate()?;

    let provider = OpenAiProvider::new(config.llm.to_openai_config())?;
    info!(model = %config.llm.model, base_url = %config.llm.base_url, "Using language model");

    build_with_provider(&args, &config, provider, formatter).map(|_| ())
}

/// Run the pipeline on the input file with any provider, print the report
/// and write the requested output files.
///
/// Overrides in `args` are expected to be applied to `config` already.
pub fn build_with_provider<L>(
    args: &BuildArgs,
    config: &Config,
    provider: L,
    formatter: &Formatter,
) -> Result<PipelineOutput>
where
    L: LlmProvider,
    L::Error: Display,
{
    let text = fs::read_to_string(&args.file)?;
    info!(file = %args.file.display(), bytes = text.len(), "Read input");

    let mut pipeline = Pipeline::new(provider, &config.chunking, config.visualization)?;
    let output = pipeline.run(&text, args.top);

    println!("{}", formatter.format_report(&output.report)?);

    if let Some(path) = &args.output {
        write_file(path, &output.visualization.to_json_pretty()?)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Visualization data written to {}", path.display()))
        );
    }

    if let Some(path) = &args.triples_out {
        write_file(path, &serde_json::to_string_pretty(&output.triples)?)?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "{} triples written to {}",
                output.triples.len(),
                path.display()
            ))
        );
    }

    Ok(output)
}
