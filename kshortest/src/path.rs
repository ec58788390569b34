//! Path values and the subpath/merge algebra.
//!
//! A [`Path`] is an immutable sequence of elements alternating vertex, edge,
//! vertex, ... when edges are embedded, or vertices only otherwise. Each
//! element may carry labels; labels ride along through [`Path::subpath`] and
//! [`Path::merge`] but never take part in equality or hashing.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use hashbrown::HashSet;

/// One element of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement<V, E> {
    Vertex(V),
    Edge(E),
}

impl<V, E> PathElement<V, E> {
    pub fn as_vertex(&self) -> Option<&V> {
        match self {
            PathElement::Vertex(v) => Some(v),
            PathElement::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&E> {
        match self {
            PathElement::Edge(e) => Some(e),
            PathElement::Vertex(_) => None,
        }
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self, PathElement::Vertex(_))
    }
}

/// An ordered, value-like sequence of path elements.
#[derive(Debug, Clone)]
pub struct Path<V, E> {
    elements: Vec<PathElement<V, E>>,
    labels: Vec<BTreeSet<String>>,
}

impl<V, E> Default for Path<V, E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl<V, E> Path<V, E> {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vertex-only path.
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut path = Self::new();
        for vertex in vertices {
            path.push(PathElement::Vertex(vertex));
        }
        path
    }

    /// Appends an unlabeled element.
    pub fn push(&mut self, element: PathElement<V, E>) {
        self.extend(element, BTreeSet::new());
    }

    /// Appends an element together with its labels.
    pub fn extend(&mut self, element: PathElement<V, E>, labels: BTreeSet<String>) {
        self.elements.push(element);
        self.labels.push(labels);
    }

    /// Number of elements (vertices plus embedded edges).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathElement<V, E>> {
        self.elements.get(index)
    }

    /// The vertex at element `index`, or `None` if that element is an edge.
    pub fn vertex_at(&self, index: usize) -> Option<&V> {
        self.elements.get(index).and_then(PathElement::as_vertex)
    }

    pub fn edge_at(&self, index: usize) -> Option<&E> {
        self.elements.get(index).and_then(PathElement::as_edge)
    }

    pub fn elements(&self) -> &[PathElement<V, E>] {
        &self.elements
    }

    /// Labels attached to element `index`.
    pub fn labels(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.labels.get(index)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.elements.iter().filter_map(PathElement::as_vertex)
    }

    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.elements.iter().filter_map(PathElement::as_edge)
    }

    /// Whether any edge is embedded.
    pub fn has_edges(&self) -> bool {
        self.elements.iter().any(|e| !e.is_vertex())
    }

    /// Hop count: number of vertices minus one.
    pub fn hops(&self) -> usize {
        self.vertices().count().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&V> {
        self.vertices().next()
    }

    pub fn target(&self) -> Option<&V> {
        self.vertices().last()
    }

    /// Prefix made of the first `to_index` elements, labels preserved.
    pub fn subpath(&self, to_index: usize) -> Self
    where
        V: Clone,
        E: Clone,
    {
        let end = to_index.min(self.elements.len());
        Self {
            elements: self.elements[..end].to_vec(),
            labels: self.labels[..end].to_vec(),
        }
    }

    /// Appends every element of `tail` after the elements of `self`.
    ///
    /// The caller guarantees the seam: when `self` stops just before a vertex
    /// `u`, `tail` must begin with `u`.
    pub fn merge(&self, tail: &Self) -> Self
    where
        V: Clone,
        E: Clone,
    {
        let mut elements = Vec::with_capacity(self.elements.len() + tail.elements.len());
        elements.extend_from_slice(&self.elements);
        elements.extend_from_slice(&tail.elements);
        let mut labels = Vec::with_capacity(elements.len());
        labels.extend_from_slice(&self.labels);
        labels.extend_from_slice(&tail.labels);
        Self { elements, labels }
    }

    /// Whether the first `len` elements of `self` equal `prefix`.
    pub fn starts_with(&self, prefix: &Self) -> bool
    where
        V: PartialEq,
        E: PartialEq,
    {
        self.elements.len() >= prefix.elements.len()
            && self.elements[..prefix.elements.len()] == prefix.elements[..]
    }
}

impl<V: Eq + Hash, E> Path<V, E> {
    /// No vertex appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::new();
        self.vertices().all(|v| seen.insert(v))
    }
}

impl<V: PartialEq, E: PartialEq> PartialEq for Path<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<V: Eq, E: Eq> Eq for Path<V, E> {}

impl<V: Hash, E: Hash> Hash for Path<V, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

/// A yielded path together with its total cost.
pub type PathEntry<V, E> = (Path<V, E>, f64);

/// A path and its cost; equality and hashing look at the path only.
#[derive(Debug, Clone)]
pub struct PathInfo<V, E> {
    pub path: Path<V, E>,
    pub cost: f64,
}

impl<V: Clone, E: Clone> PathInfo<V, E> {
    pub fn new(path: Path<V, E>, cost: f64) -> Self {
        Self { path, cost }
    }

    pub fn entry(&self) -> PathEntry<V, E> {
        (self.path.clone(), self.cost)
    }
}

impl<V: PartialEq, E: PartialEq> PartialEq for PathInfo<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<V: Eq, E: Eq> Eq for PathInfo<V, E> {}

impl<V: Hash, E: Hash> Hash for PathInfo<V, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
