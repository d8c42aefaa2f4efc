//! Flatten a graph into node and edge lists for an external renderer

use crate::builder::KnowledgeGraph;
use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default size of a node with degree 0
pub const DEFAULT_NODE_MIN_SIZE: f64 = 15.0;

/// Default size added to the highest-degree node
pub const DEFAULT_NODE_SIZE_FACTOR: f64 = 50.0;

/// Node sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSettings {
    /// Size of a node with degree 0
    pub node_min_size: f64,

    /// Size added in proportion to degree relative to the maximum degree
    pub node_size_factor: f64,
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self {
            node_min_size: DEFAULT_NODE_MIN_SIZE,
            node_size_factor: DEFAULT_NODE_SIZE_FACTOR,
        }
    }
}

/// A node ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    /// Entity id
    pub id: String,
    /// Display label; spaces become line breaks
    pub label: String,
    /// Total degree
    pub degree: usize,
    /// Display size
    pub size: f64,
    /// Hover text
    #[serde(rename = "tooltip_text")]
    pub tooltip: String,
}

/// An edge ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    /// Sequential id, `edge_<n>`
    pub id: String,
    /// Source entity id
    pub source: String,
    /// Target entity id
    pub target: String,
    /// Relation label
    pub label: String,
    /// Hover text
    #[serde(rename = "tooltip_text")]
    pub tooltip: String,
}

/// Flat node and edge lists
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VisualizationData {
    /// Nodes in graph node order
    pub nodes: Vec<VisualNode>,
    /// Edges in graph edge order
    pub edges: Vec<VisualEdge>,
}

/// Counts of converted items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionStatistics {
    /// Number of nodes
    pub total_nodes: usize,
    /// Number of edges
    pub total_edges: usize,
}

impl VisualizationData {
    /// Node and edge counts
    pub fn statistics(&self) -> ConversionStatistics {
        ConversionStatistics {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
        }
    }

    /// Elements in the `{"nodes": [{"data": ..}], "edges": [{"data": ..}]}`
    /// shape Cytoscape.js expects
    pub fn to_cytoscape_elements(&self) -> Result<Value, GraphError> {
        let wrap = |item: Value| json!({ "data": item });

        let nodes = self
            .nodes
            .iter()
            .map(|node| serde_json::to_value(node).map(wrap))
            .collect::<Result<Vec<_>, _>>()?;
        let edges = self
            .edges
            .iter()
            .map(|edge| serde_json::to_value(edge).map(wrap))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(json!({ "nodes": nodes, "edges": edges }))
    }

    /// Pretty-printed JSON of the flat lists
    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Convert a graph into renderer-ready node and edge lists
///
/// # Examples
///
/// ```
/// use kgraph_graph::{to_visualization, KnowledgeGraph, VisualizationSettings};
///
/// let mut graph = KnowledgeGraph::new();
/// graph.add_relation("marie curie", "discovered", "radium");
///
/// let data = to_visualization(&graph, &VisualizationSettings::default());
/// assert_eq!(data.nodes[0].label, "marie\ncurie");
/// assert_eq!(data.edges[0].id, "edge_0");
/// ```
pub fn to_visualization(graph: &KnowledgeGraph, settings: &VisualizationSettings) -> VisualizationData {
    if graph.is_empty() {
        return VisualizationData::default();
    }

    let degrees = graph.degrees();
    let max_degree = degrees.iter().map(|d| d.degree).max().unwrap_or(0);

    let nodes = degrees
        .into_iter()
        .map(|entry| {
            let size = if max_degree > 0 {
                settings.node_min_size
                    + (entry.degree as f64 / max_degree as f64) * settings.node_size_factor
            } else {
                settings.node_min_size
            };

            VisualNode {
                label: entry.node.replace(' ', "\n"),
                tooltip: format!("Entity: {}\nDegree: {}", entry.node, entry.degree),
                degree: entry.degree,
                size,
                id: entry.node,
            }
        })
        .collect();

    let edges = graph
        .edges()
        .enumerate()
        .map(|(n, (source, target, label))| VisualEdge {
            id: format!("edge_{}", n),
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
            tooltip: format!("Relationship: {}", label),
        })
        .collect();

    VisualizationData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let data = to_visualization(&KnowledgeGraph::new(), &VisualizationSettings::default());
        assert!(data.nodes.is_empty());
        assert!(data.edges.is_empty());
        assert_eq!(data.statistics(), ConversionStatistics { total_nodes: 0, total_edges: 0 });
    }

    #[test]
    fn test_node_sizes_scale_with_degree() {
        let mut graph = KnowledgeGraph::new();
        graph.add_relation("hub", "x", "a");
        graph.add_relation("hub", "y", "b");

        let data = to_visualization(&graph, &VisualizationSettings::default());

        assert_eq!(data.nodes[0].id, "hub");
        assert_eq!(data.nodes[0].size, 65.0);
        assert_eq!(data.nodes[1].size, 40.0);
        assert_eq!(data.nodes[0].tooltip, "Entity: hub\nDegree: 2");
    }

    #[test]
    fn test_custom_settings() {
        let mut graph = KnowledgeGraph::new();
        graph.add_relation("a", "x", "b");

        let settings = VisualizationSettings {
            node_min_size: 1.0,
            node_size_factor: 9.0,
        };
        let data = to_visualization(&graph, &settings);
        assert!(data.nodes.iter().all(|n| n.size == 10.0));
    }

    #[test]
    fn test_edges() {
        let mut graph = KnowledgeGraph::new();
        graph.add_relation("marie curie", "won", "nobel prize");
        graph.add_relation("pierre curie", "won", "nobel prize");

        let data = to_visualization(&graph, &VisualizationSettings::default());

        assert_eq!(data.edges.len(), 2);
        assert_eq!(data.edges[1].id, "edge_1");
        assert_eq!(data.edges[1].source, "pierre curie");
        assert_eq!(data.edges[1].target, "nobel prize");
        assert_eq!(data.edges[1].tooltip, "Relationship: won");
        assert_eq!(data.statistics().total_nodes, 3);
    }

    #[test]
    fn test_cytoscape_elements() {
        let mut graph = KnowledgeGraph::new();
        graph.add_relation("a b", "rel", "c");

        let data = to_visualization(&graph, &VisualizationSettings::default());
        let elements = data.to_cytoscape_elements().unwrap();

        assert_eq!(elements["nodes"][0]["data"]["id"], "a b");
        assert_eq!(elements["nodes"][0]["data"]["label"], "a\nb");
        assert_eq!(elements["edges"][0]["data"]["source"], "a b");
        assert_eq!(elements["edges"][0]["data"]["tooltip_text"], "Relationship: rel");
    }

    #[test]
    fn test_json_shape() {
        let mut graph = KnowledgeGraph::new();
        graph.add_relation("a", "rel", "b");

        let data = to_visualization(&graph, &VisualizationSettings::default());
        let value: Value = serde_json::from_str(&data.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["edges"][0]["label"], "rel");
    }
}
