//! Lazy bidirectional cursor over accepted paths.
//!
//! Moving forward past the materialised paths drives the engine exactly once
//! per new path; moving backward only replays what is already accepted.
//! `has_next` may produce a path, and that path is the one the following
//! `try_next` returns.

use common::{KspError, KspResult};

use crate::graph_traits::GraphAdapter;
use crate::path::{PathEntry, PathInfo};
use crate::yen::{YenAlgorithm, YenState};

/// Cursor returned by [`YenAlgorithm::iter`].
pub struct PathCursor<'a, 'g, G: GraphAdapter> {
    engine: &'a YenAlgorithm<'g, G>,
    state: YenState<G::VertexId, G::EdgeId>,
    index: usize,
}

impl<'a, 'g, G: GraphAdapter> PathCursor<'a, 'g, G> {
    pub(crate) fn new(engine: &'a YenAlgorithm<'g, G>) -> Self {
        Self {
            engine,
            state: YenState::new(),
            index: 0,
        }
    }

    /// Whether a path exists at the cursor position, computing it if needed.
    pub fn has_next(&mut self) -> KspResult<bool> {
        if self.index < self.state.accepted.len() {
            return Ok(true);
        }
        Ok(self.engine.advance(&mut self.state)?.is_some())
    }

    /// The path at the cursor position; fails with [`KspError::Exhausted`]
    /// when none exists.
    pub fn try_next(&mut self) -> KspResult<PathEntry<G::VertexId, G::EdgeId>> {
        if !self.has_next()? {
            return Err(KspError::Exhausted);
        }
        let entry = self.state.accepted[self.index].entry();
        self.index += 1;
        Ok(entry)
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Steps back and returns the path now at the cursor position.
    pub fn previous(&mut self) -> KspResult<PathEntry<G::VertexId, G::EdgeId>> {
        if self.index == 0 {
            return Err(KspError::Exhausted);
        }
        self.index -= 1;
        Ok(self.state.accepted[self.index].entry())
    }

    /// Index of the path `try_next` would return.
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Index of the path `previous` would return.
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Paths accepted so far, in emission order.
    pub fn accepted(&self) -> &[PathInfo<G::VertexId, G::EdgeId>] {
        &self.state.accepted
    }

    /// Whether the engine has reported exhaustion.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn add(&mut self, _entry: PathEntry<G::VertexId, G::EdgeId>) -> KspResult<()> {
        Err(KspError::UnsupportedOperation("add"))
    }

    pub fn set(&mut self, _entry: PathEntry<G::VertexId, G::EdgeId>) -> KspResult<()> {
        Err(KspError::UnsupportedOperation("set"))
    }

    pub fn remove(&mut self) -> KspResult<()> {
        Err(KspError::UnsupportedOperation("remove"))
    }
}

impl<'a, 'g, G: GraphAdapter> Iterator for PathCursor<'a, 'g, G> {
    type Item = KspResult<PathEntry<G::VertexId, G::EdgeId>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.try_next() {
            Ok(entry) => Some(Ok(entry)),
            Err(KspError::Exhausted) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
