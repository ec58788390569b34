//! Yen's k-shortest loopless paths.
//!
//! The engine holds immutable configuration only. Enumeration state (the
//! accepted list A and the candidate heap B) lives in a [`YenState`] owned by
//! each [`PathCursor`], so one engine can hand out several independent
//! cursors.
//!
//! Per accepted path P the spur pass visits every vertex position `i` of P
//! except the last. With `u = P[i]` and `R = P.subpath(i)` it:
//!
//! 1. masks the edge leaving `u` on every accepted path that starts with `R`
//!    and continues through `u`,
//! 2. masks every edge incident to a vertex of `R`,
//! 3. asks the oracle for a path `u → t` and queues `R ⊕ spur`,
//! 4. clears every marker before moving to `i + step`.

use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{KspError, KspResult};
use hashbrown::HashSet;
use ordered_float::OrderedFloat;

use crate::algorithms::oracle::{EffectiveDistance, OracleQuery, ShortestPathOracle};
use crate::config::{self, DefaultPropertyKeyFactory, PropertyKeyFactory, YenConfig};
use crate::cost::path_cost;
use crate::cursor::PathCursor;
use crate::graph_traits::GraphAdapter;
use crate::mask::EdgeMask;
use crate::options::{Computer, Distance, EdgeSelector};
use crate::path::{Path, PathEntry, PathInfo};
use crate::scored::MinScored;
use crate::Direction;

type CandidateKey = (OrderedFloat<f64>, u64);

/// Enumeration state of one cursor.
pub(crate) struct YenState<V, E> {
    /// A: accepted paths in emission order.
    pub(crate) accepted: Vec<PathInfo<V, E>>,
    accepted_paths: HashSet<Path<V, E>>,
    /// B: candidates keyed by cost, then insertion order.
    candidates: BinaryHeap<MinScored<CandidateKey, PathInfo<V, E>>>,
    queued: HashSet<Path<V, E>>,
    sequence: u64,
    /// Number of accepted paths whose spur pass has completed.
    expanded: usize,
    seeded: bool,
    finished: bool,
}

impl<V, E> YenState<V, E>
where
    V: Clone + Eq + std::hash::Hash,
    E: Clone + Eq + std::hash::Hash,
{
    pub(crate) fn new() -> Self {
        Self {
            accepted: Vec::new(),
            accepted_paths: HashSet::new(),
            candidates: BinaryHeap::new(),
            queued: HashSet::new(),
            sequence: 0,
            expanded: 0,
            seeded: false,
            finished: false,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn accept(&mut self, info: PathInfo<V, E>) -> usize {
        self.accepted_paths.insert(info.path.clone());
        self.accepted.push(info);
        self.accepted.len() - 1
    }

    /// Queues a candidate unless it is accepted or already queued.
    fn offer(&mut self, info: PathInfo<V, E>) -> bool {
        if self.accepted_paths.contains(&info.path) || self.queued.contains(&info.path) {
            return false;
        }
        self.queued.insert(info.path.clone());
        let key = (OrderedFloat(info.cost), self.sequence);
        self.sequence += 1;
        self.candidates.push(MinScored(key, info));
        true
    }

    /// Pops candidates until one is not yet accepted.
    fn select(&mut self) -> Option<PathInfo<V, E>> {
        while let Some(MinScored(_, info)) = self.candidates.pop() {
            self.queued.remove(&info.path);
            if self.accepted_paths.contains(&info.path) {
                continue;
            }
            return Some(info);
        }
        None
    }
}

/// A configured k-shortest-paths engine over a borrowed graph.
///
/// Iterating a `&YenAlgorithm` yields `(path, cost)` entries in
/// non-decreasing cost order.
pub struct YenAlgorithm<'g, G: GraphAdapter> {
    graph: &'g G,
    source: G::VertexId,
    target: G::VertexId,
    oracle: Arc<dyn ShortestPathOracle<G>>,
    edges: EdgeSelector<G>,
    distance: Distance<G>,
    include_edges: bool,
    max_distance: Option<f64>,
    disable_edge_key: String,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'g, G: GraphAdapter> YenAlgorithm<'g, G> {
    /// Starts configuring an engine for `source → target`.
    pub fn build(graph: &'g G, source: G::VertexId, target: G::VertexId) -> YenBuilder<'g, G> {
        YenBuilder::new(graph, source, target)
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn source(&self) -> &G::VertexId {
        &self.source
    }

    pub fn target(&self) -> &G::VertexId {
        &self.target
    }

    pub fn include_edges(&self) -> bool {
        self.include_edges
    }

    pub fn max_distance(&self) -> Option<f64> {
        self.max_distance
    }

    /// Name of the oracle answering spur queries.
    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    /// The marker property this engine writes onto disabled edges.
    pub fn disable_edge_key(&self) -> &str {
        &self.disable_edge_key
    }

    /// A fresh cursor positioned before the first path.
    pub fn iter(&self) -> PathCursor<'_, 'g, G> {
        PathCursor::new(self)
    }

    /// The first up to `k` paths.
    pub fn list(&self, k: usize) -> KspResult<Vec<PathEntry<G::VertexId, G::EdgeId>>> {
        self.iter().take(k).collect()
    }

    /// Element stride between consecutive vertices of a path.
    fn step(&self) -> usize {
        if self.include_edges {
            2
        } else {
            1
        }
    }

    fn check_cancelled(&self) -> KspResult<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(KspError::Cancelled),
            _ => Ok(()),
        }
    }

    fn query<'q>(&'q self, source: &'q G::VertexId, masked: bool) -> OracleQuery<'q, G> {
        let weights = if masked {
            EffectiveDistance::masked(&self.distance, &self.disable_edge_key)
        } else {
            EffectiveDistance::plain(&self.distance)
        };
        OracleQuery {
            source,
            target: &self.target,
            weights,
            edges: &self.edges,
            max_distance: self.max_distance,
            include_edges: self.include_edges,
            cancel: self.cancel.as_deref(),
        }
    }

    /// Produces the next accepted path, returning its index in A, or `None`
    /// once enumeration is exhausted.
    ///
    /// On error A is untouched; calling again repeats the failed work.
    pub(crate) fn advance(&self, state: &mut YenState<G::VertexId, G::EdgeId>) -> KspResult<Option<usize>> {
        if state.finished {
            return Ok(None);
        }
        self.check_cancelled()?;

        if !state.seeded {
            return self.seed(state);
        }

        if state.expanded < state.accepted.len() {
            let previous = state.accepted[state.accepted.len() - 1].path.clone();
            self.spur_pass(state, &previous)?;
            state.expanded = state.accepted.len();
        }

        match state.select() {
            Some(info) => {
                log::debug!("Accepted path #{} with cost {}", state.accepted.len(), info.cost);
                Ok(Some(state.accept(info)))
            }
            None => {
                log::debug!(
                    "Enumeration {:?} -> {:?} exhausted after {} paths",
                    self.source,
                    self.target,
                    state.accepted.len()
                );
                state.finished = true;
                Ok(None)
            }
        }
    }

    fn seed(&self, state: &mut YenState<G::VertexId, G::EdgeId>) -> KspResult<Option<usize>> {
        if !self.graph.contains_vertex(&self.source)? || !self.graph.contains_vertex(&self.target)? {
            log::debug!(
                "Source {:?} or target {:?} not in graph, nothing to enumerate",
                self.source,
                self.target
            );
            state.seeded = true;
            state.finished = true;
            return Ok(None);
        }

        let first = self
            .oracle
            .shortest_path(self.graph, &self.query(&self.source, false))?;
        state.seeded = true;

        match first {
            Some(path) => {
                let cost = path_cost(self.graph, &path, &self.distance, &self.edges)?;
                log::debug!("Accepted path #0 with cost {} via {}", cost, self.oracle.name());
                Ok(Some(state.accept(PathInfo::new(path, cost))))
            }
            None => {
                log::debug!("No path from {:?} to {:?}", self.source, self.target);
                state.finished = true;
                Ok(None)
            }
        }
    }

    fn spur_pass(
        &self,
        state: &mut YenState<G::VertexId, G::EdgeId>,
        previous: &Path<G::VertexId, G::EdgeId>,
    ) -> KspResult<()> {
        let step = self.step();
        let last = previous.len().saturating_sub(1);

        for i in (0..last).step_by(step) {
            self.check_cancelled()?;
            if let Some(candidate) = self.spur(state, previous, i, step)? {
                let cost = path_cost(self.graph, &candidate, &self.distance, &self.edges)?;
                if self.max_distance.map_or(false, |max| cost > max) {
                    log::trace!("Spur {} candidate cost {} exceeds cap", i, cost);
                    continue;
                }
                let queued = state.offer(PathInfo::new(candidate, cost));
                log::trace!("Spur {} candidate cost {} queued={}", i, cost, queued);
            }
        }
        Ok(())
    }

    /// One spur iteration. Every marker it writes is gone when it returns.
    fn spur(
        &self,
        state: &YenState<G::VertexId, G::EdgeId>,
        previous: &Path<G::VertexId, G::EdgeId>,
        i: usize,
        step: usize,
    ) -> KspResult<Option<Path<G::VertexId, G::EdgeId>>> {
        let spur_node = previous.vertex_at(i).ok_or_else(|| {
            KspError::Configuration(format!(
                "spur index {} is not a vertex; include_edges does not match the path layout",
                i
            ))
        })?;
        let root = previous.subpath(i);

        let mask = EdgeMask::new(self.graph, &self.disable_edge_key);
        let mut scope = mask.scope();

        for accepted in &state.accepted {
            let q = &accepted.path;
            if q.len() <= i + step || !q.starts_with(&root) || q.vertex_at(i) != Some(spur_node) {
                continue;
            }
            if self.include_edges {
                if let Some(edge) = q.edge_at(i + 1) {
                    scope.disable([edge])?;
                }
            } else if let Some(next) = q.vertex_at(i + 1) {
                let between = self.edges.edges_between(self.graph, spur_node, next)?;
                scope.disable(&between)?;
            }
        }

        for vertex in root.vertices() {
            let incident: Vec<G::EdgeId> = self
                .graph
                .incident_edges(vertex, Direction::Both)?
                .into_iter()
                .map(|(edge, _)| edge)
                .collect();
            scope.disable(&incident)?;
        }
        log::trace!("Spur {} at {:?}: {} edges disabled", i, spur_node, scope.disabled());

        let spur_path = self
            .oracle
            .shortest_path(self.graph, &self.query(spur_node, true))?;
        scope.release()?;

        let Some(spur_path) = spur_path else {
            return Ok(None);
        };
        let candidate = root.merge(&spur_path);
        if !candidate.is_simple() {
            log::warn!(
                "Oracle {} returned a spur path revisiting the root at {:?}, dropped",
                self.oracle.name(),
                spur_node
            );
            return Ok(None);
        }
        Ok(Some(candidate))
    }
}

impl<'a, 'g, G: GraphAdapter> IntoIterator for &'a YenAlgorithm<'g, G> {
    type Item = KspResult<PathEntry<G::VertexId, G::EdgeId>>;
    type IntoIter = PathCursor<'a, 'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fluent configuration for [`YenAlgorithm`].
pub struct YenBuilder<'g, G: GraphAdapter> {
    graph: &'g G,
    source: G::VertexId,
    target: G::VertexId,
    computer: Computer<G>,
    edges: EdgeSelector<G>,
    distance: Distance<G>,
    include_edges: bool,
    max_distance: Option<f64>,
    key_factory: Option<Box<dyn PropertyKeyFactory>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'g, G: GraphAdapter> YenBuilder<'g, G> {
    /// Creates a builder with default options.
    pub fn new(graph: &'g G, source: G::VertexId, target: G::VertexId) -> Self {
        Self {
            graph,
            source,
            target,
            computer: Computer::default(),
            edges: EdgeSelector::default(),
            distance: Distance::default(),
            include_edges: config::DEFAULT_INCLUDE_EDGES,
            max_distance: None,
            key_factory: None,
            cancel: None,
        }
    }

    /// Sets the shortest-path oracle.
    pub fn computer(mut self, computer: impl Into<Computer<G>>) -> Self {
        self.computer = computer.into();
        self
    }

    /// Sets the edge selector.
    pub fn edges(mut self, edges: impl Into<EdgeSelector<G>>) -> Self {
        self.edges = edges.into();
        self
    }

    /// Follows only edges in `direction` accepted by `predicate`.
    pub fn edges_filtered<F>(mut self, direction: Direction, predicate: F) -> Self
    where
        F: Fn(&G, &G::EdgeId) -> KspResult<bool> + Send + Sync + 'static,
    {
        self.edges = EdgeSelector::filtered(direction, predicate);
        self
    }

    /// Sets the edge distance. A `&str` names a numeric edge property.
    pub fn distance(mut self, distance: impl Into<Distance<G>>) -> Self {
        self.distance = distance.into();
        self
    }

    /// Computes edge distances with a closure.
    pub fn distance_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&G, &G::EdgeId) -> KspResult<f64> + Send + Sync + 'static,
    {
        self.distance = Distance::custom(f);
        self
    }

    /// Embeds traversed edges in the produced paths.
    pub fn include_edges(mut self, include_edges: bool) -> Self {
        self.include_edges = include_edges;
        self
    }

    /// Caps the cost of every produced path.
    pub fn max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Sets the factory naming the disable marker.
    pub fn property_key_factory(mut self, factory: impl PropertyKeyFactory + 'static) -> Self {
        self.key_factory = Some(Box::new(factory));
        self
    }

    /// Oracle searches and spur passes stop with [`KspError::Cancelled`]
    /// once `flag` is raised.
    pub fn cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Applies every option present in `config`. Absent options keep their
    /// current value.
    pub fn apply_config(mut self, config: &YenConfig) -> KspResult<Self> {
        config.validate()?;
        if let Some(computer) = config.computer()? {
            self.computer = computer;
        }
        if let Some(direction) = config.direction {
            self.edges = EdgeSelector::Direction(direction);
        }
        if let Some(property) = &config.distance_property {
            self.distance = Distance::Property(property.clone());
        }
        if let Some(include_edges) = config.include_edges {
            self.include_edges = include_edges;
        }
        if let Some(max_distance) = config.max_distance {
            self.max_distance = Some(max_distance);
        }
        if let Some(prefix) = &config.disable_edge_prefix {
            self.key_factory = Some(Box::new(DefaultPropertyKeyFactory::new(prefix)));
        }
        Ok(self)
    }

    /// Validates the options and builds the engine.
    pub fn create(self) -> KspResult<YenAlgorithm<'g, G>> {
        config::validate_max_distance(self.max_distance)?;

        let disable_edge_key = match &self.key_factory {
            Some(factory) => factory.disable_edge_key().to_string(),
            None => DefaultPropertyKeyFactory::default().disable_edge_key().to_string(),
        };
        if disable_edge_key.is_empty() {
            return Err(KspError::Configuration("disable edge key must not be empty".into()));
        }

        let oracle = self.computer.resolve();
        log::debug!(
            "Created k-shortest-paths engine {:?} -> {:?} (oracle: {}, edges: {:?}, distance: {:?})",
            self.source,
            self.target,
            oracle.name(),
            self.edges,
            self.distance
        );

        Ok(YenAlgorithm {
            graph: self.graph,
            source: self.source,
            target: self.target,
            oracle,
            edges: self.edges,
            distance: self.distance,
            include_edges: self.include_edges,
            max_distance: self.max_distance,
            disable_edge_key,
            cancel: self.cancel,
        })
    }
}
