//! Edge selection, distance and compute-engine variants.
//!
//! Each configuration field that accepts several value shapes is a tagged
//! enum with one variant per shape. `From` impls let the builder take the
//! plain values (`Direction`, `&str`, `bool`, `OracleKind`) directly.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use common::{GraphError, KspError, KspResult};
use serde::{Deserialize, Serialize};

use crate::algorithms::dijkstra::DijkstraOracle;
use crate::algorithms::oracle::ShortestPathOracle;
use crate::algorithms::spfa::SpfaOracle;
use crate::graph_traits::GraphAdapter;
use crate::Direction;

/// Caller predicate deciding whether an edge may be traversed.
pub type EdgePredicate<G> =
    Arc<dyn Fn(&G, &<G as GraphAdapter>::EdgeId) -> KspResult<bool> + Send + Sync>;

/// Caller function producing the distance of an edge.
pub type DistanceFn<G> =
    Arc<dyn Fn(&G, &<G as GraphAdapter>::EdgeId) -> KspResult<f64> + Send + Sync>;

/// Which edges are followed from a vertex, both by the oracle and when
/// looking up the edges between two consecutive path vertices.
pub enum EdgeSelector<G: GraphAdapter> {
    /// Edges in either orientation.
    Both,
    /// Edges in one orientation.
    Direction(Direction),
    /// Edges in `direction` accepted by `predicate`.
    Filtered {
        direction: Direction,
        predicate: EdgePredicate<G>,
    },
}

impl<G: GraphAdapter> EdgeSelector<G> {
    /// Builds a filtered selector from a closure.
    pub fn filtered<F>(direction: Direction, predicate: F) -> Self
    where
        F: Fn(&G, &G::EdgeId) -> KspResult<bool> + Send + Sync + 'static,
    {
        EdgeSelector::Filtered {
            direction,
            predicate: Arc::new(predicate),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            EdgeSelector::Both => Direction::Both,
            EdgeSelector::Direction(direction) => *direction,
            EdgeSelector::Filtered { direction, .. } => *direction,
        }
    }

    /// Selected edges touching `vertex`, paired with their other endpoint.
    pub fn expand(&self, graph: &G, vertex: &G::VertexId) -> KspResult<Vec<(G::EdgeId, G::VertexId)>> {
        let incident = graph.incident_edges(vertex, self.direction())?;
        match self {
            EdgeSelector::Filtered { predicate, .. } => {
                let mut kept = Vec::with_capacity(incident.len());
                for (edge, other) in incident {
                    if predicate(graph, &edge)? {
                        kept.push((edge, other));
                    }
                }
                Ok(kept)
            }
            _ => Ok(incident),
        }
    }

    /// Selected edges leading from `from` to `to`.
    pub fn edges_between(&self, graph: &G, from: &G::VertexId, to: &G::VertexId) -> KspResult<Vec<G::EdgeId>> {
        let candidates = graph.edges_between(from, to, self.direction())?;
        match self {
            EdgeSelector::Filtered { predicate, .. } => {
                let mut kept = Vec::with_capacity(candidates.len());
                for edge in candidates {
                    if predicate(graph, &edge)? {
                        kept.push(edge);
                    }
                }
                Ok(kept)
            }
            _ => Ok(candidates),
        }
    }
}

impl<G: GraphAdapter> Default for EdgeSelector<G> {
    fn default() -> Self {
        EdgeSelector::Both
    }
}

impl<G: GraphAdapter> Clone for EdgeSelector<G> {
    fn clone(&self) -> Self {
        match self {
            EdgeSelector::Both => EdgeSelector::Both,
            EdgeSelector::Direction(direction) => EdgeSelector::Direction(*direction),
            EdgeSelector::Filtered { direction, predicate } => EdgeSelector::Filtered {
                direction: *direction,
                predicate: Arc::clone(predicate),
            },
        }
    }
}

impl<G: GraphAdapter> fmt::Debug for EdgeSelector<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSelector::Both => write!(f, "Both"),
            EdgeSelector::Direction(direction) => write!(f, "Direction({:?})", direction),
            EdgeSelector::Filtered { direction, .. } => write!(f, "Filtered({:?}, <predicate>)", direction),
        }
    }
}

impl<G: GraphAdapter> From<Direction> for EdgeSelector<G> {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Both => EdgeSelector::Both,
            other => EdgeSelector::Direction(other),
        }
    }
}

/// Per-edge distance function.
pub enum Distance<G: GraphAdapter> {
    /// Every edge costs 1.
    Unit,
    /// Numeric value of the named edge property.
    Property(String),
    /// Caller-provided function.
    Custom(DistanceFn<G>),
}

impl<G: GraphAdapter> Distance<G> {
    /// Builds a custom distance from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&G, &G::EdgeId) -> KspResult<f64> + Send + Sync + 'static,
    {
        Distance::Custom(Arc::new(f))
    }

    /// Whether costs are plain hop counts.
    pub fn is_unit(&self) -> bool {
        matches!(self, Distance::Unit)
    }

    /// d(e) for one edge.
    pub fn evaluate(&self, graph: &G, edge: &G::EdgeId) -> KspResult<f64> {
        match self {
            Distance::Unit => Ok(1.0),
            Distance::Property(key) => match graph.edge_property(edge, key)? {
                Some(value) => value.as_f64().ok_or_else(|| {
                    GraphError::NonNumericProperty {
                        edge: format!("{:?}", edge),
                        key: key.clone(),
                    }
                    .into()
                }),
                None => Err(GraphError::MissingProperty {
                    edge: format!("{:?}", edge),
                    key: key.clone(),
                }
                .into()),
            },
            Distance::Custom(f) => f(graph, edge),
        }
    }
}

impl<G: GraphAdapter> Default for Distance<G> {
    fn default() -> Self {
        Distance::Unit
    }
}

impl<G: GraphAdapter> Clone for Distance<G> {
    fn clone(&self) -> Self {
        match self {
            Distance::Unit => Distance::Unit,
            Distance::Property(key) => Distance::Property(key.clone()),
            Distance::Custom(f) => Distance::Custom(Arc::clone(f)),
        }
    }
}

impl<G: GraphAdapter> fmt::Debug for Distance<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Unit => write!(f, "Unit"),
            Distance::Property(key) => write!(f, "Property({:?})", key),
            Distance::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl<G: GraphAdapter> From<&str> for Distance<G> {
    fn from(key: &str) -> Self {
        Distance::Property(key.to_string())
    }
}

impl<G: GraphAdapter> From<String> for Distance<G> {
    fn from(key: String) -> Self {
        Distance::Property(key)
    }
}

/// Built-in shortest-path engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Binary-heap label-setting search.
    #[default]
    Dijkstra,
    /// FIFO label-correcting search.
    Spfa,
}

impl OracleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleKind::Dijkstra => "dijkstra",
            OracleKind::Spfa => "spfa",
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OracleKind {
    type Err = KspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Ok(OracleKind::Dijkstra),
            "spfa" => Ok(OracleKind::Spfa),
            other => Err(KspError::Configuration(format!("unknown computer: {}", other))),
        }
    }
}

/// Selects the oracle that answers spur queries.
pub enum Computer<G: GraphAdapter> {
    /// `true` delegates to the default compute engine (Dijkstra);
    /// `false` runs the inline label-correcting traversal (SPFA).
    Enabled(bool),
    /// A concrete engine.
    Engine(Arc<dyn ShortestPathOracle<G>>),
    /// A built-in engine type.
    Kind(OracleKind),
}

impl<G: GraphAdapter> Computer<G> {
    /// Instantiates the oracle this variant names.
    pub fn resolve(&self) -> Arc<dyn ShortestPathOracle<G>> {
        match self {
            Computer::Enabled(true) => Arc::new(DijkstraOracle),
            Computer::Enabled(false) => Arc::new(SpfaOracle),
            Computer::Engine(engine) => Arc::clone(engine),
            Computer::Kind(OracleKind::Dijkstra) => Arc::new(DijkstraOracle),
            Computer::Kind(OracleKind::Spfa) => Arc::new(SpfaOracle),
        }
    }
}

impl<G: GraphAdapter> Default for Computer<G> {
    fn default() -> Self {
        Computer::Enabled(true)
    }
}

impl<G: GraphAdapter> Clone for Computer<G> {
    fn clone(&self) -> Self {
        match self {
            Computer::Enabled(flag) => Computer::Enabled(*flag),
            Computer::Engine(engine) => Computer::Engine(Arc::clone(engine)),
            Computer::Kind(kind) => Computer::Kind(*kind),
        }
    }
}

impl<G: GraphAdapter> fmt::Debug for Computer<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Computer::Enabled(flag) => write!(f, "Enabled({})", flag),
            Computer::Engine(engine) => write!(f, "Engine({})", engine.name()),
            Computer::Kind(kind) => write!(f, "Kind({})", kind),
        }
    }
}

impl<G: GraphAdapter> From<bool> for Computer<G> {
    fn from(flag: bool) -> Self {
        Computer::Enabled(flag)
    }
}

impl<G: GraphAdapter> From<OracleKind> for Computer<G> {
    fn from(kind: OracleKind) -> Self {
        Computer::Kind(kind)
    }
}

impl<G: GraphAdapter> From<Arc<dyn ShortestPathOracle<G>>> for Computer<G> {
    fn from(engine: Arc<dyn ShortestPathOracle<G>>) -> Self {
        Computer::Engine(engine)
    }
}
