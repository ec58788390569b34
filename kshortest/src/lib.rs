//! **K-Shortest Paths** - Lazy enumeration of loopless paths with Yen's algorithm.
//!
//! Given a source vertex, a target vertex and a notion of edge distance, the
//! engine produces a strictly cost-ordered sequence of simple paths, computing
//! only as many as the caller consumes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                PathCursor (lazy, bidirectional)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ drives on demand
//!                       ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            YenAlgorithm (accepted list A, heap B)            │
//! │  ┌───────────────┬──────────────┬────────────────────────┐ │
//! │  │ EdgeMask      │ Oracle       │ Path algebra           │ │
//! │  │ (marker prop) │ (Dijkstra /  │ (subpath, merge, cost) │ │
//! │  │               │  SPFA / own) │                        │ │
//! │  └───────────────┴──────────────┴────────────────────────┘ │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ GraphAdapter
//!                       ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        Graph store (MemoryGraph or caller-provided)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use kshortest::prelude::*;
//!
//! let graph = MemoryGraph::new();
//! graph.add_weighted_edge("a", "b", "weight", 1.0).unwrap();
//! graph.add_weighted_edge("b", "c", "weight", 1.0).unwrap();
//! graph.add_weighted_edge("a", "c", "weight", 5.0).unwrap();
//!
//! let yen = YenAlgorithm::build(&graph, NodeId::from("a"), NodeId::from("c"))
//!     .edges(Direction::Outgoing)
//!     .distance("weight")
//!     .create()
//!     .unwrap();
//!
//! let paths = yen.list(10).unwrap();
//! assert_eq!(paths.len(), 2);
//! assert_eq!(paths[0].1, 2.0);
//! assert_eq!(paths[1].1, 5.0);
//! ```
//!
//! # Modules
//!
//! - [graph_traits]: the graph adapter contract
//! - [memory]: in-memory adjacency store implementing the adapter
//! - [algorithms]: shortest-path oracles and the simple-path enumerator
//! - [path]: path values and the subpath/merge algebra
//! - [cost]: path cost evaluation
//! - [mask]: transient edge disabling with guaranteed cleanup
//! - [yen]: the engine and its builder
//! - [cursor]: lazy bidirectional iteration over accepted paths

use serde::{Deserialize, Serialize};

/// Edge direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// An `Outgoing` edge is an outward edge *from* the current vertex.
    Outgoing,
    /// An `Incoming` edge is an inbound edge *to* the current vertex.
    Incoming,
    /// Either orientation.
    Both,
}

impl Direction {
    /// Return the opposite `Direction`.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }

    /// Whether edges leaving a vertex are followed.
    #[inline]
    pub fn includes_outgoing(self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    /// Whether edges entering a vertex are followed.
    #[inline]
    pub fn includes_incoming(self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}

/// Convenience re-exports of Direction variants
pub use Direction::{Both, Incoming, Outgoing};

// ============================================================================
// MODULE ORGANIZATION
// ============================================================================

/// Configuration constants and structures
pub mod config;

/// Graph adapter trait
pub mod graph_traits;

/// In-memory adjacency graph
pub mod memory;

/// Edge selection, distance and compute-engine variants
pub mod options;

/// Scored types for priority queues
pub mod scored;

/// Path values and path algebra
pub mod path;

/// Path cost evaluation
pub mod cost;

/// Transient edge masking
pub mod mask;

/// Shortest-path oracles and path enumeration
pub mod algorithms;

/// Yen's k-shortest-paths engine
pub mod yen;

/// Lazy bidirectional cursor
pub mod cursor;

/// Common imports
pub mod prelude;

pub use common::{EdgeId, GraphError, KspError, KspResult, NodeId, PropertyValue};
pub use config::{DefaultPropertyKeyFactory, PropertyKeyFactory, YenConfig};
pub use cursor::PathCursor;
pub use graph_traits::GraphAdapter;
pub use memory::MemoryGraph;
pub use options::{Computer, Distance, EdgeSelector, OracleKind};
pub use path::{Path, PathElement, PathEntry, PathInfo};
pub use yen::{YenAlgorithm, YenBuilder};
