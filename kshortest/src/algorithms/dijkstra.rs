//! Dijkstra's shortest path algorithm over a [`GraphAdapter`].
//!
//! # Example
//! ```rust
//! use kshortest::algorithms::{DijkstraOracle, EffectiveDistance, OracleQuery, ShortestPathOracle};
//! use kshortest::{Distance, EdgeSelector, MemoryGraph, NodeId};
//!
//! let graph = MemoryGraph::new();
//! graph.add_weighted_edge("start", "mid", "weight", 1.0).unwrap();
//! graph.add_weighted_edge("mid", "goal", "weight", 1.0).unwrap();
//! graph.add_weighted_edge("start", "goal", "weight", 5.0).unwrap();
//!
//! let distance = Distance::from("weight");
//! let edges = EdgeSelector::Both;
//! let (start, goal) = (NodeId::from("start"), NodeId::from("goal"));
//! let query = OracleQuery {
//!     source: &start,
//!     target: &goal,
//!     weights: EffectiveDistance::plain(&distance),
//!     edges: &edges,
//!     max_distance: None,
//!     include_edges: false,
//!     cancel: None,
//! };
//! let path = DijkstraOracle.shortest_path(&graph, &query).unwrap().unwrap();
//! assert_eq!(path.hops(), 2);
//! ```

use std::collections::BinaryHeap;

use common::KspResult;
use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use super::oracle::{reconstruct_path, OracleQuery, ShortestPathOracle};
use crate::graph_traits::GraphAdapter;
use crate::path::Path;
use crate::scored::MinScored;

/// Binary-heap label-setting search with early exit at the target.
///
/// Fetches edges on demand per settled vertex. Edges whose effective weight
/// is `+∞` are never relaxed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraOracle;

impl<G: GraphAdapter> ShortestPathOracle<G> for DijkstraOracle {
    fn shortest_path(
        &self,
        graph: &G,
        query: &OracleQuery<'_, G>,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>> {
        let mut visited = HashSet::new();
        let mut scores: HashMap<G::VertexId, f64> = HashMap::new();
        let mut predecessor: HashMap<G::VertexId, (G::EdgeId, G::VertexId)> = HashMap::new();
        let mut visit_next = BinaryHeap::new();

        scores.insert(query.source.clone(), 0.0);
        visit_next.push(MinScored(0.0, query.source.clone()));

        while let Some(MinScored(node_score, node)) = visit_next.pop() {
            query.check_cancelled()?;

            if visited.contains(&node) {
                continue;
            }

            if &node == query.target {
                return reconstruct_path(&predecessor, &node, query.include_edges).map(Some);
            }

            for (edge, next) in query.edges.expand(graph, &node)? {
                if visited.contains(&next) {
                    continue;
                }

                let weight = query.weights.weight(graph, &edge)?;
                if weight.is_infinite() {
                    continue;
                }

                let next_score = node_score + weight;
                if !query.within_cap(next_score) {
                    continue;
                }

                match scores.entry(next.clone()) {
                    Entry::Occupied(mut ent) => {
                        if next_score < *ent.get() {
                            *ent.get_mut() = next_score;
                            predecessor.insert(next.clone(), (edge, node.clone()));
                            visit_next.push(MinScored(next_score, next));
                        }
                    }
                    Entry::Vacant(ent) => {
                        ent.insert(next_score);
                        predecessor.insert(next.clone(), (edge, node.clone()));
                        visit_next.push(MinScored(next_score, next));
                    }
                }
            }

            visited.insert(node);
        }

        Ok(None)
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}
