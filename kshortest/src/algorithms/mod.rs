// Oracle contract and shared query types
pub mod oracle;

// Oracle implementations
pub mod dijkstra;
pub mod spfa;

// Reference enumeration
pub mod simple_paths;

pub use dijkstra::DijkstraOracle;
pub use oracle::{EffectiveDistance, OracleQuery, ShortestPathOracle};
pub use simple_paths::all_simple_paths;
pub use spfa::SpfaOracle;
