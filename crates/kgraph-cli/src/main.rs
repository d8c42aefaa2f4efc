//! kgraph - turn prose into a knowledge graph.

use anyhow::Context;
use clap::Parser;
use kgraph_cli::cli::{ConfigAction, ConfigArgs};
use kgraph_cli::{commands, Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    // `config init` must work even when the existing file is broken
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Build(args) => commands::execute_build(args, &config, &formatter)?,
        Command::Chunk(args) => commands::execute_chunk(args, &config, &formatter)?,
        Command::Graph(args) => commands::execute_graph(args, &config, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config_path, &config, &formatter)?
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for tables and JSON.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
