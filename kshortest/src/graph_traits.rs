//! The graph adapter contract.
//!
//! The engine never owns a graph. It reads vertices and edges through
//! [`GraphAdapter`] and writes exactly one kind of data back: a transient
//! numeric property on edges it wants the oracle to skip. All methods take
//! `&self` so several engines (each with its own marker key) can share a
//! store; implementations provide their own interior synchronisation.

use std::fmt::Debug;
use std::hash::Hash;

use common::{KspResult, PropertyValue};

use crate::Direction;

/// Read access to vertices and edges plus edge property writes.
pub trait GraphAdapter {
    /// The type of vertex identifiers.
    type VertexId: Clone + Eq + Hash + Debug;

    /// The type of edge identifiers.
    type EdgeId: Clone + Eq + Hash + Debug;

    /// Whether the vertex exists.
    fn contains_vertex(&self, vertex: &Self::VertexId) -> KspResult<bool>;

    /// Returns `(out_vertex, in_vertex)` of the edge.
    fn edge_endpoints(&self, edge: &Self::EdgeId) -> KspResult<(Self::VertexId, Self::VertexId)>;

    /// Edges touching `vertex` in `direction`, each paired with its other endpoint.
    fn incident_edges(
        &self,
        vertex: &Self::VertexId,
        direction: Direction,
    ) -> KspResult<Vec<(Self::EdgeId, Self::VertexId)>>;

    /// Reads an edge property.
    fn edge_property(&self, edge: &Self::EdgeId, key: &str) -> KspResult<Option<PropertyValue>>;

    /// Writes an edge property, replacing any previous value.
    fn set_edge_property(&self, edge: &Self::EdgeId, key: &str, value: PropertyValue) -> KspResult<()>;

    /// Drops an edge property. Returns whether it was present.
    fn remove_edge_property(&self, edge: &Self::EdgeId, key: &str) -> KspResult<bool>;

    /// Every edge currently carrying `key`.
    fn edges_with_property(&self, key: &str) -> KspResult<Vec<Self::EdgeId>>;

    /// Edges from `from` to `to` honoring `direction`.
    fn edges_between(
        &self,
        from: &Self::VertexId,
        to: &Self::VertexId,
        direction: Direction,
    ) -> KspResult<Vec<Self::EdgeId>> {
        let mut found: Vec<Self::EdgeId> = Vec::new();
        for (edge, other) in self.incident_edges(from, direction)? {
            if &other == to && !found.contains(&edge) {
                found.push(edge);
            }
        }
        Ok(found)
    }
}
