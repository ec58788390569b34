//! The single-source shortest-path oracle contract.
//!
//! The engine asks one question repeatedly: "what is a cheapest simple path
//! from this vertex to the target, ignoring disabled edges?" Anything that
//! can answer it implements [`ShortestPathOracle`].

use std::sync::atomic::{AtomicBool, Ordering};

use common::{GraphError, KspError, KspResult};
use hashbrown::HashMap;

use crate::graph_traits::GraphAdapter;
use crate::options::{Distance, EdgeSelector};
use crate::path::{Path, PathElement};

/// Edge weight as seen by an oracle.
///
/// With a marker key set, an edge carrying the marker takes the marker's
/// numeric value (conventionally `+∞`); every other edge falls back to the
/// configured distance.
pub struct EffectiveDistance<'a, G: GraphAdapter> {
    distance: &'a Distance<G>,
    marker_key: Option<&'a str>,
}

impl<'a, G: GraphAdapter> EffectiveDistance<'a, G> {
    /// Distance on the unmodified graph.
    pub fn plain(distance: &'a Distance<G>) -> Self {
        Self { distance, marker_key: None }
    }

    /// Distance that honours the disable marker stored under `marker_key`.
    pub fn masked(distance: &'a Distance<G>, marker_key: &'a str) -> Self {
        Self {
            distance,
            marker_key: Some(marker_key),
        }
    }

    pub fn marker_key(&self) -> Option<&str> {
        self.marker_key
    }

    /// Weight of `edge`. `+∞` means the edge must not be traversed.
    pub fn weight(&self, graph: &G, edge: &G::EdgeId) -> KspResult<f64> {
        if let Some(key) = self.marker_key {
            if let Some(value) = graph.edge_property(edge, key)?.and_then(|v| v.as_f64()) {
                return Ok(value);
            }
        }
        let weight = self.distance.evaluate(graph, edge)?;
        if weight.is_nan() || weight < 0.0 {
            return Err(GraphError::NegativeDistance {
                edge: format!("{:?}", edge),
                value: weight,
            }
            .into());
        }
        Ok(weight)
    }
}

/// One shortest-path request.
pub struct OracleQuery<'a, G: GraphAdapter> {
    pub source: &'a G::VertexId,
    pub target: &'a G::VertexId,
    pub weights: EffectiveDistance<'a, G>,
    pub edges: &'a EdgeSelector<G>,
    /// Paths costlier than this are not returned.
    pub max_distance: Option<f64>,
    /// Whether the returned path embeds the traversed edges.
    pub include_edges: bool,
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a, G: GraphAdapter> OracleQuery<'a, G> {
    /// Fails with [`KspError::Cancelled`] once the cancellation flag is raised.
    pub fn check_cancelled(&self) -> KspResult<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(KspError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Whether a tentative distance is still within the cap.
    pub fn within_cap(&self, distance: f64) -> bool {
        self.max_distance.map_or(true, |max| distance <= max)
    }
}

/// A pluggable single-source shortest-path search.
///
/// Implementations return `Ok(None)` when no path exists; errors are reserved
/// for store failures and cancellation and are propagated unchanged.
pub trait ShortestPathOracle<G: GraphAdapter>: Send + Sync {
    /// One minimum-cost path from `query.source` to `query.target`.
    fn shortest_path(
        &self,
        graph: &G,
        query: &OracleQuery<'_, G>,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>>;

    /// Short engine name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Rebuilds a path by walking predecessor links back from `target`.
pub(crate) fn reconstruct_path<V, E>(
    predecessor: &HashMap<V, (E, V)>,
    target: &V,
    include_edges: bool,
) -> KspResult<Path<V, E>>
where
    V: Clone + Eq + std::hash::Hash + std::fmt::Debug,
    E: Clone,
{
    let mut reversed = vec![PathElement::Vertex(target.clone())];
    let mut current = target;
    while let Some((edge, previous)) = predecessor.get(current) {
        if reversed.len() > 2 * predecessor.len() + 1 {
            return Err(GraphError::Other(format!("predecessor cycle through {:?}", previous)).into());
        }
        if include_edges {
            reversed.push(PathElement::Edge(edge.clone()));
        }
        reversed.push(PathElement::Vertex(previous.clone()));
        current = previous;
    }

    let mut path = Path::new();
    for element in reversed.into_iter().rev() {
        path.push(element);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use common::{NodeId, PropertyValue};

    #[test]
    fn test_masked_weight_overrides_distance() {
        let graph = MemoryGraph::new();
        let edge = graph.add_weighted_edge("a", "b", "weight", 2.0).unwrap();
        let distance = Distance::<MemoryGraph>::from("weight");

        let masked = EffectiveDistance::masked(&distance, "run_disable_edge");
        assert_eq!(masked.weight(&graph, &edge).unwrap(), 2.0);

        graph
            .set_edge_property(&edge, "run_disable_edge", PropertyValue::Number(f64::INFINITY))
            .unwrap();
        assert!(masked.weight(&graph, &edge).unwrap().is_infinite());
        assert_eq!(EffectiveDistance::plain(&distance).weight(&graph, &edge).unwrap(), 2.0);
    }

    #[test]
    fn test_negative_distance_rejected() {
        let graph = MemoryGraph::new();
        let edge = graph.add_weighted_edge("a", "b", "weight", -1.0).unwrap();
        let distance = Distance::<MemoryGraph>::from("weight");
        assert!(matches!(
            EffectiveDistance::plain(&distance).weight(&graph, &edge),
            Err(KspError::Graph(GraphError::NegativeDistance { .. }))
        ));
    }

    #[test]
    fn test_reconstruct_path() {
        let mut predecessor = HashMap::new();
        predecessor.insert("b", ("ab", "a"));
        predecessor.insert("c", ("bc", "b"));

        let with_edges = reconstruct_path(&predecessor, &"c", true).unwrap();
        assert_eq!(with_edges.len(), 5);
        assert_eq!(with_edges.edge_at(1), Some(&"ab"));

        let vertices = reconstruct_path(&predecessor, &"c", false).unwrap();
        assert_eq!(vertices, Path::from_vertices(["a", "b", "c"]));

        let single = reconstruct_path::<_, &str>(&HashMap::new(), &"a", true).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_cancel_flag() {
        let graph = MemoryGraph::new();
        graph.add_edge("a", "b").unwrap();
        let distance = Distance::<MemoryGraph>::Unit;
        let edges = EdgeSelector::<MemoryGraph>::Both;
        let flag = AtomicBool::new(false);
        let (a, b) = (NodeId::from("a"), NodeId::from("b"));
        let query = OracleQuery {
            source: &a,
            target: &b,
            weights: EffectiveDistance::plain(&distance),
            edges: &edges,
            max_distance: Some(1.0),
            include_edges: false,
            cancel: Some(&flag),
        };
        assert!(query.check_cancelled().is_ok());
        assert!(query.within_cap(1.0));
        assert!(!query.within_cap(1.5));
        flag.store(true, Ordering::Relaxed);
        assert_eq!(query.check_cancelled(), Err(KspError::Cancelled));
    }
}
