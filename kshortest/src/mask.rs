//! Transient edge masking.
//!
//! An [`EdgeMask`] writes a numeric `+∞` property under its marker key onto
//! edges the oracle must skip, and removes such properties again.
//! [`MaskScope`] ties the cleanup to a lexical scope. It remembers the edges
//! it marked and [`MaskScope::release`] clears exactly those. If the scope is
//! dropped unreleased (an early `?` return or a panic) it falls back to a full
//! scan of the marker key, so the graph is still left clean.

use common::{KspResult, PropertyValue};

use crate::config::DISABLED_EDGE_DISTANCE;
use crate::graph_traits::GraphAdapter;

/// Installs and clears the disable marker on edges of a shared graph.
pub struct EdgeMask<'a, G: GraphAdapter> {
    graph: &'a G,
    key: &'a str,
}

impl<'a, G: GraphAdapter> EdgeMask<'a, G> {
    pub fn new(graph: &'a G, key: &'a str) -> Self {
        Self { graph, key }
    }

    /// The marker property key.
    pub fn key(&self) -> &str {
        self.key
    }

    pub fn is_disabled(&self, edge: &G::EdgeId) -> KspResult<bool> {
        Ok(self.graph.edge_property(edge, self.key)?.is_some())
    }

    /// Writes the marker unless already present. Returns whether it wrote.
    fn mark(&self, edge: &G::EdgeId) -> KspResult<bool> {
        if self.is_disabled(edge)? {
            return Ok(false);
        }
        self.graph
            .set_edge_property(edge, self.key, PropertyValue::Number(DISABLED_EDGE_DISTANCE))?;
        Ok(true)
    }

    /// Marks each edge. Edges already marked are skipped. Returns how many
    /// markers were written.
    pub fn disable<'e, I>(&self, edges: I) -> KspResult<usize>
    where
        I: IntoIterator<Item = &'e G::EdgeId>,
        G::EdgeId: 'e,
    {
        let mut written = 0;
        for edge in edges {
            if self.mark(edge)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Removes the marker from the given edges. Returns how many carried it.
    pub fn enable<'e, I>(&self, edges: I) -> KspResult<usize>
    where
        I: IntoIterator<Item = &'e G::EdgeId>,
        G::EdgeId: 'e,
    {
        let mut removed = 0;
        for edge in edges {
            if self.graph.remove_edge_property(edge, self.key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Removes the marker from every edge carrying it.
    pub fn enable_all(&self) -> KspResult<usize> {
        let marked = self.graph.edges_with_property(self.key)?;
        for edge in &marked {
            self.graph.remove_edge_property(edge, self.key)?;
        }
        Ok(marked.len())
    }

    /// Opens a scope whose end clears the markers it wrote.
    pub fn scope(&self) -> MaskScope<'_, 'a, G> {
        MaskScope {
            mask: self,
            written: Vec::new(),
            released: false,
        }
    }
}

/// Guard returned by [`EdgeMask::scope`].
pub struct MaskScope<'m, 'a, G: GraphAdapter> {
    mask: &'m EdgeMask<'a, G>,
    written: Vec<G::EdgeId>,
    released: bool,
}

impl<'m, 'a, G: GraphAdapter> MaskScope<'m, 'a, G> {
    pub fn disable<'e, I>(&mut self, edges: I) -> KspResult<usize>
    where
        I: IntoIterator<Item = &'e G::EdgeId>,
        G::EdgeId: 'e,
    {
        let before = self.written.len();
        for edge in edges {
            if self.mask.mark(edge)? {
                self.written.push(edge.clone());
            }
        }
        Ok(self.written.len() - before)
    }

    pub fn is_disabled(&self, edge: &G::EdgeId) -> KspResult<bool> {
        self.mask.is_disabled(edge)
    }

    /// Markers written through this scope so far.
    pub fn disabled(&self) -> usize {
        self.written.len()
    }

    /// Clears the markers this scope wrote and reports how many were removed.
    /// On error the scope stays unreleased and its drop runs the full scan.
    pub fn release(mut self) -> KspResult<usize> {
        let removed = self.mask.enable(&self.written)?;
        self.released = true;
        Ok(removed)
    }
}

impl<'m, 'a, G: GraphAdapter> Drop for MaskScope<'m, 'a, G> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.mask.enable_all() {
            log::error!("Failed to clear disable markers '{}': {}", self.mask.key(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use common::KspError;

    const KEY: &str = "test_disable_edge";

    #[test]
    fn test_disable_is_idempotent() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let e2 = graph.add_edge("b", "c").unwrap();
        let mask = EdgeMask::new(&graph, KEY);

        assert_eq!(mask.disable([&e1]).unwrap(), 1);
        assert_eq!(mask.disable([&e1, &e2]).unwrap(), 1);
        assert!(mask.is_disabled(&e1).unwrap());
        assert_eq!(
            graph.edge_property(&e1, KEY).unwrap(),
            Some(PropertyValue::Number(f64::INFINITY))
        );
        assert_eq!(mask.enable_all().unwrap(), 2);
        assert!(graph.edges_with_property(KEY).unwrap().is_empty());
    }

    #[test]
    fn test_scope_release() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let mask = EdgeMask::new(&graph, KEY);

        let mut scope = mask.scope();
        scope.disable([&e1]).unwrap();
        assert_eq!(scope.disabled(), 1);
        assert!(scope.is_disabled(&e1).unwrap());
        assert_eq!(scope.release().unwrap(), 1);
        assert!(!mask.is_disabled(&e1).unwrap());
    }

    #[test]
    fn test_release_clears_only_scope_writes() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let e2 = graph.add_edge("b", "c").unwrap();
        let e3 = graph.add_edge("c", "d").unwrap();
        let mask = EdgeMask::new(&graph, KEY);
        mask.disable([&e1]).unwrap();

        let mut scope = mask.scope();
        assert_eq!(scope.disable([&e1, &e2]).unwrap(), 1);
        assert_eq!(scope.disable([&e3]).unwrap(), 1);
        assert_eq!(scope.disabled(), 2);
        assert_eq!(scope.release().unwrap(), 2);

        assert!(mask.is_disabled(&e1).unwrap());
        assert!(!mask.is_disabled(&e2).unwrap());
        assert!(!mask.is_disabled(&e3).unwrap());
        assert_eq!(mask.enable([&e1, &e2]).unwrap(), 1);
        assert!(graph.edges_with_property(KEY).unwrap().is_empty());
    }

    #[test]
    fn test_unreleased_scope_falls_back_to_full_scan() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let e2 = graph.add_edge("b", "c").unwrap();
        let mask = EdgeMask::new(&graph, KEY);
        mask.disable([&e1]).unwrap();

        {
            let mut scope = mask.scope();
            scope.disable([&e2]).unwrap();
        }
        assert!(graph.edges_with_property(KEY).unwrap().is_empty());
    }

    #[test]
    fn test_scope_cleans_up_on_early_return() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let mask = EdgeMask::new(&graph, KEY);

        let failing = || -> KspResult<()> {
            let mut scope = mask.scope();
            scope.disable([&e1])?;
            Err(KspError::Cancelled)
        };
        assert_eq!(failing(), Err(KspError::Cancelled));
        assert!(graph.edges_with_property(KEY).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_keys_untouched() {
        let graph = MemoryGraph::new();
        let e1 = graph.add_edge("a", "b").unwrap();
        let mine = EdgeMask::new(&graph, KEY);
        let theirs = EdgeMask::new(&graph, "other_disable_edge");

        theirs.disable([&e1]).unwrap();
        mine.disable([&e1]).unwrap();
        mine.enable_all().unwrap();
        assert!(theirs.is_disabled(&e1).unwrap());
        assert!(!mine.is_disabled(&e1).unwrap());
    }
}
