//! Degree-based analytics over a [`KnowledgeGraph`]

use crate::builder::KnowledgeGraph;
use crate::error::GraphError;
use petgraph::algo::connected_components;
use petgraph::Direction;
use serde::Serialize;

/// Total-degree summary over all nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeStats {
    /// Mean degree
    pub average: f64,
    /// Smallest degree
    pub min: usize,
    /// Largest degree
    pub max: usize,
}

/// Whole-graph statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    /// Number of nodes
    pub num_nodes: usize,

    /// Number of edges
    pub num_edges: usize,

    /// `e / (n * (n - 1))`; 0 for graphs with fewer than two nodes
    pub density: f64,

    /// Whether the graph is connected when edge direction is ignored
    pub is_connected: bool,

    /// Number of weakly connected components; only reported when the graph
    /// is not connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_components: Option<usize>,

    /// Degree summary; absent for the empty graph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<DegreeStats>,
}

/// A node and its total degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDegree {
    /// Node id
    pub node: String,
    /// In-degree plus out-degree
    pub degree: usize,
}

/// One edge seen from a node, naming the node at the other end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborEdge {
    /// Node at the other end of the edge
    pub peer: String,
    /// Edge label
    pub relation: String,
}

/// Neighborhood of a single node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    /// Node id
    pub node_id: String,

    /// In-degree plus out-degree
    pub degree: usize,

    /// Edges ending at the node
    pub in_degree: usize,

    /// Edges starting at the node
    pub out_degree: usize,

    /// Sources of incoming edges
    pub predecessors: Vec<String>,

    /// Targets of outgoing edges
    pub successors: Vec<String>,

    /// Incoming edges with their labels
    pub incoming: Vec<NeighborEdge>,

    /// Outgoing edges with their labels
    pub outgoing: Vec<NeighborEdge>,
}

impl KnowledgeGraph {
    /// Compute whole-graph statistics
    pub fn statistics(&self) -> GraphStatistics {
        let n = self.node_count();
        if n == 0 {
            return GraphStatistics {
                num_nodes: 0,
                num_edges: 0,
                density: 0.0,
                is_connected: false,
                num_components: Some(0),
                degree: None,
            };
        }

        let e = self.edge_count();
        let density = if n > 1 {
            e as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };

        let components = connected_components(&self.graph);
        let is_connected = components == 1;

        let degrees: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.degree_of(idx))
            .collect();
        let degree = DegreeStats {
            average: degrees.iter().sum::<usize>() as f64 / n as f64,
            min: degrees.iter().copied().min().unwrap_or(0),
            max: degrees.iter().copied().max().unwrap_or(0),
        };

        GraphStatistics {
            num_nodes: n,
            num_edges: e,
            density,
            is_connected,
            num_components: (!is_connected).then_some(components),
            degree: Some(degree),
        }
    }

    /// Total degree of every node, in node order
    pub fn degrees(&self) -> Vec<NodeDegree> {
        self.graph
            .node_indices()
            .map(|idx| NodeDegree {
                node: self.graph[idx].clone(),
                degree: self.degree_of(idx),
            })
            .collect()
    }

    /// The `n` nodes of highest total degree
    ///
    /// Ties keep node insertion order.
    pub fn top_nodes(&self, n: usize) -> Vec<NodeDegree> {
        let mut degrees = self.degrees();
        degrees.sort_by(|a, b| b.degree.cmp(&a.degree));
        degrees.truncate(n);
        degrees
    }

    /// Degree of a single node
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.lookup(id).map(|idx| self.degree_of(idx))
    }

    /// Describe a node's neighborhood
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `id` is not a node.
    pub fn node_info(&self, id: &str) -> Result<NodeInfo, GraphError> {
        let node = self
            .lookup(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        let neighbors = |direction: Direction| -> Vec<NeighborEdge> {
            self.sorted_edges(node, direction)
                .into_iter()
                .filter_map(|edge| {
                    let (source, target) = self.graph.edge_endpoints(edge)?;
                    let peer = match direction {
                        Direction::Incoming => source,
                        Direction::Outgoing => target,
                    };
                    Some(NeighborEdge {
                        peer: self.graph[peer].clone(),
                        relation: self.graph[edge].clone(),
                    })
                })
                .collect()
        };

        let incoming = neighbors(Direction::Incoming);
        let outgoing = neighbors(Direction::Outgoing);

        Ok(NodeInfo {
            node_id: id.to_string(),
            degree: incoming.len() + outgoing.len(),
            in_degree: incoming.len(),
            out_degree: outgoing.len(),
            predecessors: incoming.iter().map(|e| e.peer.clone()).collect(),
            successors: outgoing.iter().map(|e| e.peer.clone()).collect(),
            incoming,
            outgoing,
        })
    }
}
