//! Chunk command implementation.

use crate::cli::ChunkArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use kgraph_extractor::TextChunker;
use std::fs;

/// Execute the chunk command.
pub fn execute_chunk(args: ChunkArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut chunking = config.chunking;
    args.chunking.apply(&mut chunking);

    let chunker = TextChunker::from_config(&chunking)?;
    let text = fs::read_to_string(&args.file)?;

    let chunks = chunker.chunk(&text);
    let stats = chunker.statistics(&chunks);

    println!("{}", formatter.format_chunks(&chunks, &stats)?);
    Ok(())
}
