//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kshortest::algorithms::{DijkstraOracle, OracleQuery, ShortestPathOracle};
use kshortest::{EdgeId, GraphAdapter, GraphError, KspResult, MemoryGraph, NodeId, Path};

/// Routes `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn n(id: &str) -> NodeId {
    NodeId::from(id)
}

/// Vertex ids of a path as plain strings.
pub fn ids(path: &Path<NodeId, EdgeId>) -> Vec<String> {
    path.vertices().map(|v| v.as_str().to_string()).collect()
}

/// The textbook Yen example: C→H with weights on `weight`.
pub fn canonical_graph() -> MemoryGraph {
    let graph = MemoryGraph::new();
    for (from, to, weight) in [
        ("C", "D", 3.0),
        ("C", "E", 2.0),
        ("D", "F", 4.0),
        ("E", "D", 1.0),
        ("E", "F", 2.0),
        ("E", "G", 3.0),
        ("F", "G", 2.0),
        ("F", "H", 1.0),
        ("G", "H", 2.0),
    ] {
        graph.add_weighted_edge(from, to, "weight", weight).unwrap();
    }
    graph
}

/// A→B, A→C, B→D, C→D, unweighted.
pub fn diamond_graph() -> MemoryGraph {
    let graph = MemoryGraph::new();
    graph.add_edge("A", "B").unwrap();
    graph.add_edge("A", "C").unwrap();
    graph.add_edge("B", "D").unwrap();
    graph.add_edge("C", "D").unwrap();
    graph
}

/// `size` x `size` grid with edges pointing right and down, unit weights.
pub fn grid_graph(size: usize) -> MemoryGraph {
    let graph = MemoryGraph::new();
    for row in 0..size {
        for col in 0..size {
            let here = format!("{}_{}", row, col);
            if col + 1 < size {
                graph
                    .add_weighted_edge(here.as_str(), format!("{}_{}", row, col + 1), "weight", 1.0)
                    .unwrap();
            }
            if row + 1 < size {
                graph
                    .add_weighted_edge(here.as_str(), format!("{}_{}", row + 1, col), "weight", 1.0)
                    .unwrap();
            }
        }
    }
    graph
}

/// Whether any edge still carries `key`.
pub fn is_clean(graph: &MemoryGraph, key: &str) -> bool {
    graph.edges_with_property(key).unwrap().is_empty()
}

/// Dijkstra that counts its invocations.
#[derive(Default)]
pub struct CountingOracle {
    pub calls: AtomicUsize,
}

impl CountingOracle {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<G: GraphAdapter> ShortestPathOracle<G> for CountingOracle {
    fn shortest_path(
        &self,
        graph: &G,
        query: &OracleQuery<'_, G>,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DijkstraOracle.shortest_path(graph, query)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Dijkstra that fails once, on its `fail_on`-th invocation (1-based),
/// after masking for that spur iteration is already in place.
pub struct FlakyOracle {
    calls: AtomicUsize,
    fail_on: usize,
}

impl FlakyOracle {
    pub fn new(fail_on: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_on,
        })
    }
}

impl<G: GraphAdapter> ShortestPathOracle<G> for FlakyOracle {
    fn shortest_path(
        &self,
        graph: &G,
        query: &OracleQuery<'_, G>,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(GraphError::Other("store unavailable".to_string()).into());
        }
        DijkstraOracle.shortest_path(graph, query)
    }
}
