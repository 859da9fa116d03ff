//! Gatekeeper configuration.

use std::fmt;

use mapgate_graph::GraphConfig;
use serde::{Deserialize, Serialize};

use crate::GateError;

/// Everything a [`Gatekeeper`](crate::Gatekeeper) needs, as one JSON document.
///
/// The graph fields sit at the top level next to `authorizer_hash`:
///
/// ```json
/// {
///   "authorizer_hash": "9f86d081884c7d65",
///   "validate_maps": true,
///   "map_tokens": { "hub": "", "cave": "hub_clear" },
///   "token_sources": { "hub_clear": "hub" }
/// }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct GatekeeperConfig {
    /// Secret expected in the `au` header of privileged requests.
    pub authorizer_hash: String,

    #[serde(flatten)]
    pub graph: GraphConfig,
}

impl GatekeeperConfig {
    pub fn new(authorizer_hash: impl Into<String>, graph: GraphConfig) -> Self {
        Self {
            authorizer_hash: authorizer_hash.into(),
            graph,
        }
    }

    /// Parses a config from JSON.
    ///
    /// # Errors
    /// Returns [`GateError::Parse`] if the JSON is malformed or
    /// `authorizer_hash` is missing.
    pub fn from_json(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for GatekeeperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatekeeperConfig")
            .field("authorizer_hash", &"<redacted>")
            .field("graph", &self.graph)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use mapgate_graph::DEFAULT_MAX_CHAIN_DEPTH;

    use super::*;

    #[test]
    fn test_from_json_flattened_graph_fields() {
        let config = GatekeeperConfig::from_json(
            r#"{
                "authorizer_hash": "abc",
                "validate_maps": false,
                "map_tokens": { "hub": "" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.authorizer_hash, "abc");
        assert!(!config.graph.validate_maps);
        assert_eq!(config.graph.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
        assert!(config.graph.map_tokens.contains_key("hub"));
    }

    #[test]
    fn test_from_json_missing_hash_returns_parse_error() {
        let result = GatekeeperConfig::from_json(r#"{ "map_tokens": {} }"#);
        assert!(matches!(result, Err(GateError::Parse(_))));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let config = GatekeeperConfig::new("topsecret", GraphConfig::default());
        assert!(!format!("{config:?}").contains("topsecret"));
    }
}
