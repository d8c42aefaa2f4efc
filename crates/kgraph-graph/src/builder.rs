//! Directed knowledge graph assembled from normalized triples

use kgraph_domain::NormalizedTriple;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use tracing::info;

/// A directed graph of entities joined by labeled relations
///
/// Node identity is the normalized entity string. There is at most one edge
/// per ordered `(subject, object)` pair; inserting the pair again replaces
/// the label but keeps the edge's original position. Self-loops are allowed.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    pub(crate) graph: DiGraph<String, String>,
    pub(crate) node_index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or relabel the edge `subject -> object`
    pub fn add_relation(&mut self, subject: &str, predicate: &str, object: &str) {
        let source = self.ensure_node(subject);
        let target = self.ensure_node(object);
        self.graph.update_edge(source, target, predicate.to_string());
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether `id` is a node
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Label of the edge `source -> target`, if present
    pub fn edge_label(&self, source: &str, target: &str) -> Option<&str> {
        let a = *self.node_index.get(source)?;
        let b = *self.node_index.get(target)?;
        self.graph
            .find_edge(a, b)
            .map(|edge| self.graph[edge].as_str())
    }

    /// Node ids in first-insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |idx| self.graph[idx].as_str())
    }

    /// Edges as `(source, target, label)`
    ///
    /// Grouped by source node in node order; within a source, in the order
    /// each edge was first inserted.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.graph.node_indices().flat_map(move |source| {
            self.sorted_edges(source, Direction::Outgoing)
                .into_iter()
                .map(move |edge| {
                    let (a, b) = self.graph.edge_endpoints(edge).unwrap_or((source, source));
                    (
                        self.graph[a].as_str(),
                        self.graph[b].as_str(),
                        self.graph[edge].as_str(),
                    )
                })
        })
    }

    /// Edges touching `node` in one direction, in first-insertion order
    pub(crate) fn sorted_edges(&self, node: NodeIndex, direction: Direction) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| edge.id())
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Total degree; a self-loop counts twice
    pub(crate) fn degree_of(&self, node: NodeIndex) -> usize {
        self.graph.edges_directed(node, Direction::Incoming).count()
            + self.graph.edges_directed(node, Direction::Outgoing).count()
    }

    pub(crate) fn lookup(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }
}

/// Builds a fresh [`KnowledgeGraph`] from a triple list
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Build a graph from normalized triples
    ///
    /// Each triple adds the edge `subject -> predicate -> object`. When two
    /// triples share subject and object the later predicate wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use kgraph_domain::{NormalizedTriple, SourceChunk};
    /// use kgraph_graph::GraphBuilder;
    ///
    /// let triple = |s: &str, p: &str, o: &str| NormalizedTriple {
    ///     subject: s.into(),
    ///     predicate: p.into(),
    ///     object: o.into(),
    ///     source_chunk: SourceChunk::Chunk(1),
    /// };
    ///
    /// let graph = GraphBuilder::new().build(&[
    ///     triple("marie curie", "discovered", "radium"),
    ///     triple("marie curie", "isolated", "radium"),
    /// ]);
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.edge_label("marie curie", "radium"), Some("isolated"));
    /// ```
    pub fn build(&self, triples: &[NormalizedTriple]) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();

        for triple in triples {
            graph.add_relation(&triple.subject, &triple.predicate, &triple.object);
        }

        info!(
            triples = triples.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built knowledge graph"
        );

        graph
    }
}
