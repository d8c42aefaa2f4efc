//! kgraph Graph
//!
//! Directed knowledge graph construction, degree analytics, and conversion
//! to flat node/edge lists for rendering.
//!
//! # Examples
//!
//! ```
//! use kgraph_domain::{NormalizedTriple, SourceChunk};
//! use kgraph_graph::GraphBuilder;
//!
//! let triples = vec![NormalizedTriple {
//!     subject: "marie curie".into(),
//!     predicate: "discovered".into(),
//!     object: "radium".into(),
//!     source_chunk: SourceChunk::Chunk(1),
//! }];
//!
//! let graph = GraphBuilder::new().build(&triples);
//! let stats = graph.statistics();
//!
//! assert_eq!(stats.num_nodes, 2);
//! assert!(stats.is_connected);
//! assert_eq!(graph.top_nodes(1)[0].degree, 1);
//! ```

#![warn(missing_docs)]

mod analytics;
mod builder;
pub mod converter;
mod error;

pub use analytics::{DegreeStats, GraphStatistics, NeighborEdge, NodeDegree, NodeInfo};
pub use builder::{GraphBuilder, KnowledgeGraph};
pub use converter::{
    to_visualization, ConversionStatistics, VisualEdge, VisualNode, VisualizationData,
    VisualizationSettings,
};
pub use error::GraphError;
