//! kgraph CLI library.
//!
//! Configuration, command execution, the end-to-end [`Pipeline`] and output
//! formatting for the `kgraph` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::{Config, LlmSettings, OutputFormat, Settings};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
