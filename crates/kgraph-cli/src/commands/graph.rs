//! Graph command implementation.

use super::write_file;
use crate::cli::GraphArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kgraph_gatekeeper::normalize_and_deduplicate;
use kgraph_graph::{to_visualization, GraphBuilder, KnowledgeGraph};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the graph command.
pub fn execute_graph(args: GraphArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let values = load_triples(&args.triples)?;
    let corpus = normalize_and_deduplicate(&values);
    let graph = GraphBuilder::new().build(&corpus.triples);

    match &args.node {
        Some(node) => {
            let info = graph.node_info(node)?;
            println!("{}", formatter.format_node_info(&info)?);
        }
        None => {
            println!(
                "{}",
                formatter.format_graph_summary(
                    &corpus.stats,
                    &graph.statistics(),
                    &graph.top_nodes(args.top)
                )?
            );
        }
    }

    if let Some(path) = &args.output {
        write_visualization(&graph, config, path)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Visualization data written to {}", path.display()))
        );
    }

    Ok(())
}

/// Read a JSON array of triple objects.
///
/// Entries are kept as raw values so that malformed ones are counted by
/// normalization instead of failing the whole load.
pub fn load_triples(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&contents)? {
        Value::Array(values) => {
            info!(count = values.len(), file = %path.display(), "Loaded triples");
            Ok(values)
        }
        _ => Err(CliError::InvalidInput(format!(
            "{} does not hold a JSON array of triples",
            path.display()
        ))),
    }
}

fn write_visualization(graph: &KnowledgeGraph, config: &Config, path: &Path) -> Result<()> {
    let data = to_visualization(graph, &config.visualization);
    write_file(path, &data.to_json_pretty()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_triples_rejects_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triples.json");
        fs::write(&path, r#"{"subject": "a", "predicate": "b", "object": "c"}"#).unwrap();

        assert!(matches!(load_triples(&path), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_load_triples_keeps_malformed_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triples.json");
        fs::write(
            &path,
            r#"[{"subject": "A", "predicate": "b", "object": "C"}, {"subject": 3}]"#,
        )
        .unwrap();

        let values = load_triples(&path).unwrap();
        assert_eq!(values.len(), 2);

        let corpus = normalize_and_deduplicate(&values);
        assert_eq!(corpus.stats.empty_removed, 1);
        assert_eq!(corpus.triples[0].subject, "a");
    }
}
