//! Configuration constants and structures for the k-shortest-paths engine.
//!
//! - Marker property naming lives here, nowhere else
//! - [`YenConfig`] is the serde-loadable form of the builder options

use serde::{Deserialize, Serialize};

use common::{KspError, KspResult};

use crate::graph_traits::GraphAdapter;
use crate::options::{Computer, OracleKind};
use crate::Direction;

// ============================================================================
// Disable Marker
// ============================================================================

/// Suffix of the transient property that disables an edge.
pub const DISABLE_EDGE_KEY: &str = "disable_edge";

/// Joins the per-engine prefix and [`DISABLE_EDGE_KEY`].
pub const KEY_SEPARATOR: &str = "_";

/// Value stored under the marker key. Oracles never relax such an edge.
pub const DISABLED_EDGE_DISTANCE: f64 = f64::INFINITY;

// ============================================================================
// Engine Defaults
// ============================================================================

/// Paths carry vertices only unless asked otherwise.
pub const DEFAULT_INCLUDE_EDGES: bool = false;

/// Produces the marker property name an engine writes onto disabled edges.
///
/// Engines sharing a graph must receive distinct keys.
pub trait PropertyKeyFactory: Send + Sync {
    fn disable_edge_key(&self) -> &str;
}

/// `<prefix>_disable_edge`, with a random UUID as the default prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPropertyKeyFactory {
    key: String,
}

impl DefaultPropertyKeyFactory {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            key: format!("{}{}{}", prefix.as_ref(), KEY_SEPARATOR, DISABLE_EDGE_KEY),
        }
    }
}

impl Default for DefaultPropertyKeyFactory {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

impl PropertyKeyFactory for DefaultPropertyKeyFactory {
    fn disable_edge_key(&self) -> &str {
        &self.key
    }
}

/// `computer` as it appears in a config file: a flag or an engine name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputerSetting {
    Flag(bool),
    Kind(String),
}

/// Builder options loadable from JSON.
///
/// Every field is optional; an absent field leaves the builder's current
/// setting alone.
///
/// ```rust
/// use kshortest::YenConfig;
///
/// let config = YenConfig::from_json(r#"{"computer": "spfa", "distance_property": "weight"}"#).unwrap();
/// assert_eq!(config.distance_property.as_deref(), Some("weight"));
/// assert_eq!(config.include_edges, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YenConfig {
    /// Absent means the builder keeps its oracle (Dijkstra by default).
    pub computer: Option<ComputerSetting>,
    /// Absent means both directions.
    pub direction: Option<Direction>,
    /// Absent means unit distance.
    pub distance_property: Option<String>,
    pub include_edges: Option<bool>,
    pub max_distance: Option<f64>,
    /// Absent means a random prefix per engine.
    pub disable_edge_prefix: Option<String>,
}

impl YenConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> KspResult<Self> {
        let config: YenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> KspResult<()> {
        validate_max_distance(self.max_distance)?;
        if let Some(ComputerSetting::Kind(name)) = &self.computer {
            name.parse::<OracleKind>()?;
        }
        if let Some(prefix) = &self.disable_edge_prefix {
            if prefix.is_empty() {
                return Err(KspError::Configuration("disable_edge_prefix must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Resolves the `computer` setting, if present.
    pub fn computer<G: GraphAdapter>(&self) -> KspResult<Option<Computer<G>>> {
        match &self.computer {
            None => Ok(None),
            Some(ComputerSetting::Flag(flag)) => Ok(Some(Computer::Enabled(*flag))),
            Some(ComputerSetting::Kind(name)) => Ok(Some(Computer::Kind(name.parse()?))),
        }
    }
}

/// `None`, `+∞` and finite non-negative caps are accepted.
pub fn validate_max_distance(max_distance: Option<f64>) -> KspResult<()> {
    match max_distance {
        Some(max) if max.is_nan() || max < 0.0 => Err(KspError::Configuration(format!(
            "max_distance must be a non-negative number, got {}",
            max
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;

    #[test]
    fn test_default_key_shape() {
        let factory = DefaultPropertyKeyFactory::default();
        let key = factory.disable_edge_key();
        assert!(key.ends_with("_disable_edge"));
        let prefix = &key[..key.len() - "_disable_edge".len()];
        assert!(uuid::Uuid::parse_str(prefix).is_ok());
        assert_ne!(key, DefaultPropertyKeyFactory::default().disable_edge_key());
    }

    #[test]
    fn test_custom_prefix() {
        let factory = DefaultPropertyKeyFactory::new("engine1");
        assert_eq!(factory.disable_edge_key(), "engine1_disable_edge");
    }

    #[test]
    fn test_config_defaults() {
        let config = YenConfig::from_json("{}").unwrap();
        assert_eq!(config, YenConfig::default());
        assert_eq!(config.include_edges, None);
        assert!(config.computer::<MemoryGraph>().unwrap().is_none());
    }

    #[test]
    fn test_config_full() {
        let config = YenConfig::from_json(
            r#"{
                "computer": false,
                "direction": "outgoing",
                "distance_property": "weight",
                "include_edges": true,
                "max_distance": 10.0,
                "disable_edge_prefix": "run7"
            }"#,
        )
        .unwrap();
        assert_eq!(config.direction, Some(Direction::Outgoing));
        assert_eq!(config.include_edges, Some(true));
        assert_eq!(config.max_distance, Some(10.0));
        assert!(matches!(
            config.computer::<MemoryGraph>().unwrap(),
            Some(Computer::Enabled(false))
        ));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            YenConfig::from_json(r#"{"computer": "bellman"}"#),
            Err(KspError::Configuration(_))
        ));
        assert!(matches!(
            YenConfig::from_json(r#"{"max_distance": -1.0}"#),
            Err(KspError::Configuration(_))
        ));
        assert!(matches!(
            YenConfig::from_json(r#"{"direction": "sideways"}"#),
            Err(KspError::Serialization(_))
        ));
    }

    #[test]
    fn test_max_distance_validation() {
        assert!(validate_max_distance(None).is_ok());
        assert!(validate_max_distance(Some(0.0)).is_ok());
        assert!(validate_max_distance(Some(f64::INFINITY)).is_ok());
        assert!(validate_max_distance(Some(f64::NAN)).is_err());
    }
}
