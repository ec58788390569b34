//! In-memory adjacency graph implementing [`GraphAdapter`].
//!
//! Vertices and edges are keyed by [`NodeId`] / [`EdgeId`]. Parallel edges
//! and self-loops are allowed. Adjacency lists keep insertion order so
//! traversals are deterministic.
//!
//! ```rust
//! use kshortest::{MemoryGraph, GraphAdapter, Direction, NodeId};
//!
//! let graph = MemoryGraph::new();
//! let edge = graph.add_weighted_edge("chat_1", "msg_1", "weight", 2.0).unwrap();
//! let out = graph.incident_edges(&NodeId::from("chat_1"), Direction::Outgoing).unwrap();
//! assert_eq!(out, vec![(edge, NodeId::from("msg_1"))]);
//! ```

use common::{EdgeId, GraphError, KspResult, NodeId, PropertyValue};
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::graph_traits::GraphAdapter;
use crate::Direction;

#[derive(Debug, Default, Clone)]
struct Adjacency {
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Default)]
struct GraphData {
    vertices: HashMap<NodeId, Adjacency>,
    edges: HashMap<EdgeId, EdgeRecord>,
}

/// Thread-safe in-memory graph store.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: RwLock<GraphData>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex. Adding an existing vertex is a no-op.
    pub fn add_vertex(&self, id: impl Into<NodeId>) -> NodeId {
        let id = id.into();
        self.inner.write().vertices.entry(id.clone()).or_default();
        id
    }

    /// Adds an edge with just vertex IDs (convenience method).
    ///
    /// Generates an edge ID `from:to`, suffixed with a counter for parallel
    /// edges. Missing endpoints are created.
    pub fn add_edge(&self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> KspResult<EdgeId> {
        let from = from.into();
        let to = to.into();
        let mut data = self.inner.write();
        let base = format!("{}:{}", from, to);
        let mut edge_id = EdgeId::new(base.clone());
        let mut n = 1;
        while data.edges.contains_key(&edge_id) {
            edge_id = EdgeId::new(format!("{}:{}", base, n));
            n += 1;
        }
        Self::insert_edge(&mut data, edge_id.clone(), from, to);
        Ok(edge_id)
    }

    /// Adds an edge under a caller-chosen ID.
    pub fn add_edge_with_id(
        &self,
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> KspResult<EdgeId> {
        let id = id.into();
        let mut data = self.inner.write();
        if data.edges.contains_key(&id) {
            return Err(GraphError::Other(format!("Edge already exists: {}", id)).into());
        }
        Self::insert_edge(&mut data, id.clone(), from.into(), to.into());
        Ok(id)
    }

    /// Adds an edge and stores `weight` under `key`.
    pub fn add_weighted_edge(
        &self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        key: &str,
        weight: f64,
    ) -> KspResult<EdgeId> {
        let edge = self.add_edge(from, to)?;
        self.set_edge_property(&edge, key, PropertyValue::Number(weight))?;
        Ok(edge)
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }

    /// All vertex IDs, sorted.
    pub fn vertex_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.inner.read().vertices.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn insert_edge(data: &mut GraphData, id: EdgeId, from: NodeId, to: NodeId) {
        data.vertices.entry(from.clone()).or_default().outgoing.push(id.clone());
        data.vertices.entry(to.clone()).or_default().incoming.push(id.clone());
        data.edges.insert(
            id,
            EdgeRecord {
                source: from,
                target: to,
                properties: HashMap::new(),
            },
        );
    }
}

impl GraphAdapter for MemoryGraph {
    type VertexId = NodeId;
    type EdgeId = EdgeId;

    fn contains_vertex(&self, vertex: &NodeId) -> KspResult<bool> {
        Ok(self.inner.read().vertices.contains_key(vertex))
    }

    fn edge_endpoints(&self, edge: &EdgeId) -> KspResult<(NodeId, NodeId)> {
        let data = self.inner.read();
        let record = data
            .edges
            .get(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))?;
        Ok((record.source.clone(), record.target.clone()))
    }

    fn incident_edges(&self, vertex: &NodeId, direction: Direction) -> KspResult<Vec<(EdgeId, NodeId)>> {
        let data = self.inner.read();
        let adjacency = data
            .vertices
            .get(vertex)
            .ok_or_else(|| GraphError::VertexNotFound(vertex.to_string()))?;

        let mut result = Vec::new();
        if direction.includes_outgoing() {
            for edge_id in &adjacency.outgoing {
                if let Some(record) = data.edges.get(edge_id) {
                    result.push((edge_id.clone(), record.target.clone()));
                }
            }
        }
        if direction.includes_incoming() {
            for edge_id in &adjacency.incoming {
                if let Some(record) = data.edges.get(edge_id) {
                    result.push((edge_id.clone(), record.source.clone()));
                }
            }
        }
        Ok(result)
    }

    fn edge_property(&self, edge: &EdgeId, key: &str) -> KspResult<Option<PropertyValue>> {
        let data = self.inner.read();
        let record = data
            .edges
            .get(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))?;
        Ok(record.properties.get(key).cloned())
    }

    fn set_edge_property(&self, edge: &EdgeId, key: &str, value: PropertyValue) -> KspResult<()> {
        let mut data = self.inner.write();
        let record = data
            .edges
            .get_mut(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))?;
        record.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_edge_property(&self, edge: &EdgeId, key: &str) -> KspResult<bool> {
        let mut data = self.inner.write();
        let record = data
            .edges
            .get_mut(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))?;
        Ok(record.properties.remove(key).is_some())
    }

    fn edges_with_property(&self, key: &str) -> KspResult<Vec<EdgeId>> {
        let data = self.inner.read();
        Ok(data
            .edges
            .iter()
            .filter(|(_, record)| record.properties.contains_key(key))
            .map(|(id, _)| id.clone())
            .collect())
    }
}
