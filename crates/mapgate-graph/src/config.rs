//! Graph configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{GraphError, MapId, TokenId};

/// Default cap on the number of gated maps a single chain check may visit.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// GraphConfig
// ---------------------------------------------------------------------------

/// Static map/token configuration, loaded once at startup.
///
/// Every field has a default, so a config file only needs the parts it
/// cares about.
///
/// ```json
/// {
///   "validate_maps": true,
///   "map_tokens": { "hub": "", "cave": "hub_clear" },
///   "token_sources": { "hub_clear": "hub" },
///   "mixing_groups": [["cave", "cave_night"]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// When `false`, every token check passes. Used on servers where
    /// map gating is switched off (local testing, events).
    pub validate_maps: bool,

    /// Maximum number of gated maps (maps with a real requirement) one
    /// chain check may walk before giving up. Cyclic configuration always
    /// hits this limit.
    pub max_chain_depth: usize,

    /// Map → token required to enter it. The empty token means "free".
    pub map_tokens: HashMap<MapId, TokenId>,

    /// Token → map that grants it.
    pub token_sources: HashMap<TokenId, MapId>,

    /// Groups of maps that are interchangeable for ghost mixing.
    pub mixing_groups: Vec<Vec<MapId>>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            validate_maps: true,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            map_tokens: HashMap::new(),
            token_sources: HashMap::new(),
            mixing_groups: Vec::new(),
        }
    }
}

impl GraphConfig {
    /// Parses a config from JSON.
    ///
    /// # Errors
    /// Returns [`GraphError::Parse`] if the JSON doesn't match the schema.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a map with its required token. Builder-style, mostly for tests
    /// and tools that assemble a config in code.
    pub fn with_map(
        mut self,
        map: impl Into<MapId>,
        token: impl Into<TokenId>,
    ) -> Self {
        self.map_tokens.insert(map.into(), token.into());
        self
    }

    /// Declares that `token` is granted by `map`.
    pub fn with_source(
        mut self,
        token: impl Into<TokenId>,
        map: impl Into<MapId>,
    ) -> Self {
        self.token_sources.insert(token.into(), map.into());
        self
    }

    /// Appends a mixing group.
    pub fn with_mixing_group<I, M>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MapId>,
    {
        self.mixing_groups
            .push(group.into_iter().map(Into::into).collect());
        self
    }
}
