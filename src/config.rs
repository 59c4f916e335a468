//! Graph configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GO biological_process root.
pub const BIOLOGICAL_PROCESS: &str = "GO:0008150";
/// GO molecular_function root.
pub const MOLECULAR_FUNCTION: &str = "GO:0003674";
/// GO cellular_component root.
pub const CELLULAR_COMPONENT: &str = "GO:0005575";

/// Tuning knobs for an [`OntologyGraph`](crate::OntologyGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Vertices past which ancestor traversal does not continue. Also the
    /// stop set `sub_graph` falls back to when the caller passes none.
    pub stop_nodes: BTreeSet<String>,
    /// Compute every ancestor-edge closure up front instead of on first use.
    pub prewarm_cache: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            stop_nodes: default_stop_nodes(),
            prewarm_cache: false,
        }
    }
}

impl GraphConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_stop_nodes(mut self, nodes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stop_nodes = nodes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prewarm(mut self, prewarm: bool) -> Self {
        self.prewarm_cache = prewarm;
        self
    }
}

/// The three GO domain roots.
pub fn default_stop_nodes() -> BTreeSet<String> {
    [BIOLOGICAL_PROCESS, MOLECULAR_FUNCTION, CELLULAR_COMPONENT]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_go_roots() {
        let config = GraphConfig::default();
        assert_eq!(config.stop_nodes.len(), 3);
        assert!(config.stop_nodes.contains(BIOLOGICAL_PROCESS));
        assert!(!config.prewarm_cache);
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = GraphConfig::from_json(r#"{"prewarm_cache": true}"#).unwrap();
        assert!(config.prewarm_cache);
        assert_eq!(config.stop_nodes, default_stop_nodes());

        let config = GraphConfig::from_json(r#"{"stop_nodes": ["HP:0000001"]}"#).unwrap();
        assert_eq!(config.stop_nodes.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GraphConfig::from_json("{stop_nodes"),
            Err(Error::Config(_))
        ));
    }
}
