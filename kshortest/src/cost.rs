//! Path cost evaluation.
//!
//! - No distance configured: hop count.
//! - Edges embedded: sum of d(e) over the embedded edges.
//! - Vertices only: for every consecutive pair, the cheapest selected edge
//!   between them, summed. Parallel edges resolve to their minimum even if
//!   the oracle walked a costlier one.

use common::{GraphError, KspResult};

use crate::graph_traits::GraphAdapter;
use crate::options::{Distance, EdgeSelector};
use crate::path::Path;

pub fn path_cost<G: GraphAdapter>(
    graph: &G,
    path: &Path<G::VertexId, G::EdgeId>,
    distance: &Distance<G>,
    edges: &EdgeSelector<G>,
) -> KspResult<f64> {
    if distance.is_unit() {
        return Ok(path.hops() as f64);
    }

    if path.has_edges() {
        let mut cost = 0.0;
        for edge in path.edges() {
            cost += distance.evaluate(graph, edge)?;
        }
        return Ok(cost);
    }

    let vertices: Vec<&G::VertexId> = path.vertices().collect();
    let mut cost = 0.0;
    for pair in vertices.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let mut cheapest: Option<f64> = None;
        for edge in edges.edges_between(graph, from, to)? {
            let value = distance.evaluate(graph, &edge)?;
            cheapest = Some(cheapest.map_or(value, |c| c.min(value)));
        }
        cost += cheapest
            .ok_or_else(|| GraphError::EdgeNotFound(format!("{:?} -> {:?}", from, to)))?;
    }
    Ok(cost)
}
