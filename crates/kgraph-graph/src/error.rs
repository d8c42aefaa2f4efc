//! Error types for graph operations

use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    /// The requested entity is not a node of the graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Visualization data could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
