//! Convenient re-exports for engine users.
//!
//! ```rust
//! use kshortest::prelude::*;
//! ```

pub use crate::algorithms::{DijkstraOracle, ShortestPathOracle, SpfaOracle};
pub use crate::config::{DefaultPropertyKeyFactory, PropertyKeyFactory, YenConfig};
pub use crate::cursor::PathCursor;
pub use crate::graph_traits::GraphAdapter;
pub use crate::memory::MemoryGraph;
pub use crate::options::{Computer, Distance, EdgeSelector, OracleKind};
pub use crate::path::{Path, PathElement, PathEntry, PathInfo};
pub use crate::yen::{YenAlgorithm, YenBuilder};
pub use crate::Direction;
pub use common::{EdgeId, KspError, KspResult, NodeId};
