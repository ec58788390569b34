//! SPFA (Shortest Path Faster Algorithm) over a [`GraphAdapter`].

use std::collections::VecDeque;

use common::KspResult;
use hashbrown::{HashMap, HashSet};

use super::oracle::{reconstruct_path, OracleQuery, ShortestPathOracle};
use crate::graph_traits::GraphAdapter;
use crate::path::Path;

/// FIFO label-correcting search.
///
/// Explores the whole reachable region before answering, so it touches more
/// of the graph than [`DijkstraOracle`](super::DijkstraOracle) but needs no
/// priority queue. Distances must be non-negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpfaOracle;

impl<G: GraphAdapter> ShortestPathOracle<G> for SpfaOracle {
    fn shortest_path(
        &self,
        graph: &G,
        query: &OracleQuery<'_, G>,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>> {
        let mut distances: HashMap<G::VertexId, f64> = HashMap::new();
        let mut predecessor: HashMap<G::VertexId, (G::EdgeId, G::VertexId)> = HashMap::new();
        distances.insert(query.source.clone(), 0.0);

        let mut queue = VecDeque::new();
        queue.push_back(query.source.clone());

        let mut in_queue = HashSet::new();
        in_queue.insert(query.source.clone());

        while let Some(node) = queue.pop_front() {
            query.check_cancelled()?;
            in_queue.remove(&node);

            let node_dist = distances.get(&node).copied().unwrap_or(f64::INFINITY);

            for (edge, next) in query.edges.expand(graph, &node)? {
                if &next == query.source {
                    continue;
                }

                let weight = query.weights.weight(graph, &edge)?;
                if weight.is_infinite() {
                    continue;
                }

                let new_dist = node_dist + weight;
                if !query.within_cap(new_dist) {
                    continue;
                }

                let should_update = match distances.get(&next) {
                    Some(&old_dist) => new_dist < old_dist,
                    None => true,
                };

                if should_update {
                    distances.insert(next.clone(), new_dist);
                    predecessor.insert(next.clone(), (edge, node.clone()));

                    if !in_queue.contains(&next) && &next != query.target {
                        in_queue.insert(next.clone());
                        queue.push_back(next);
                    }
                }
            }
        }

        if distances.contains_key(query.target) {
            reconstruct_path(&predecessor, query.target, query.include_edges).map(Some)
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &'static str {
        "spfa"
    }
}
