//! Error types for path enumeration.
//!
//! Every fallible operation in the workspace returns [`KspResult`]. Graph
//! store failures are wrapped in [`GraphError`] and surface unchanged through
//! the engine; exhaustion is only an error for callers that explicitly ask
//! for a next path that does not exist.

use thiserror::Error;

/// Errors raised by a graph store or by reading edge data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// Vertex not found.
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// Edge not found.
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// Distance property missing on an edge.
    #[error("Edge {edge} has no property '{key}'")]
    MissingProperty { edge: String, key: String },

    /// Distance property present but not numeric.
    #[error("Property '{key}' on edge {edge} is not numeric")]
    NonNumericProperty { edge: String, key: String },

    /// Distance function produced a negative or NaN value.
    #[error("Edge {edge} has invalid distance {value}")]
    NegativeDistance { edge: String, value: f64 },

    /// Lock poisoning or other store-internal failure.
    #[error("Other graph error: {0}")]
    Other(String),
}

/// Errors surfaced by the k-shortest-paths engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KspError {
    /// A configuration value reached a dispatch that cannot use it.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The underlying graph failed a query or mutation.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// No further path exists.
    #[error("No more paths")]
    Exhausted,

    /// Mutating cursor operations are rejected.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A shortest-path search observed its cancellation flag.
    #[error("Shortest path search cancelled")]
    Cancelled,

    /// Configuration payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for KspError {
    fn from(err: serde_json::Error) -> Self {
        KspError::Serialization(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type KspResult<T> = Result<T, KspError>;
