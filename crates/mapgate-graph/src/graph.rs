//! The map/token graph and mixing groups.
//!
//! Requirements form a directed chain:
//!
//! ```text
//! map ──requires──→ token ──sourced from──→ map ──requires──→ …
//! ```
//!
//! ending at a map that requires the empty token. Nothing here assumes
//! the chain actually ends; the walk in [`chain`](crate::TokenChainAuthorizer)
//! is bounded.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::{ConfigWarning, GraphConfig, MapId, TokenId};

/// Read-only view of the map/token tables and mixing groups.
///
/// Built once from a [`GraphConfig`] and never mutated afterwards, so a
/// shared reference can be used from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct MapGraph {
    map_tokens: HashMap<MapId, TokenId>,
    token_sources: HashMap<TokenId, MapId>,
    mixing_groups: Vec<Vec<MapId>>,
}

impl MapGraph {
    /// Takes ownership of the tables in `config`.
    ///
    /// Suspicious but legal configuration is logged, not rejected.
    pub fn from_config(config: GraphConfig) -> Self {
        let graph = Self {
            map_tokens: config.map_tokens,
            token_sources: config.token_sources,
            mixing_groups: config.mixing_groups,
        };
        graph.lint();
        graph
    }

    /// Token required to enter `map`, or `None` for an unknown map.
    pub fn required_token(&self, map: &str) -> Option<&TokenId> {
        self.map_tokens.get(map)
    }

    /// Map that grants `token`, or `None` if nothing does.
    pub fn token_source(&self, token: &str) -> Option<&MapId> {
        self.token_sources.get(token)
    }

    /// Returns `true` if `map` appears in the requirement table.
    pub fn contains_map(&self, map: &str) -> bool {
        self.map_tokens.contains_key(map)
    }

    /// Iterates over every known map, in no particular order.
    pub fn maps(&self) -> impl Iterator<Item = &MapId> {
        self.map_tokens.keys()
    }

    /// Returns the mixing group `map` belongs to.
    ///
    /// Groups are scanned in configured order and the first one containing
    /// `map` wins. A map in no group gets a group of its own.
    pub fn mixing_for_map(&self, map: &str) -> Cow<'_, [MapId]> {
        self.mixing_groups
            .iter()
            .find(|group| group.iter().any(|m| m.as_str() == map))
            .map(|group| Cow::Borrowed(group.as_slice()))
            .unwrap_or_else(|| Cow::Owned(vec![MapId::from(map)]))
    }

    pub fn mixing_groups(&self) -> &[Vec<MapId>] {
        &self.mixing_groups
    }

    /// Lists configuration that is legal but probably a mistake.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let mut seen = HashSet::new();
        for map in self.mixing_groups.iter().flatten() {
            if !seen.insert(map) {
                warnings.push(ConfigWarning::OverlappingMixingGroups(map.clone()));
            }
        }

        for (map, token) in &self.map_tokens {
            if !token.is_none() && !self.token_sources.contains_key(token) {
                warnings.push(ConfigWarning::UnsourcedToken {
                    map: map.clone(),
                    token: token.clone(),
                });
            }
        }

        for (token, map) in &self.token_sources {
            if !self.map_tokens.contains_key(map) {
                warnings.push(ConfigWarning::UnknownSourceMap {
                    token: token.clone(),
                    map: map.clone(),
                });
            }
        }

        warnings
    }

    fn lint(&self) {
        for warning in self.warnings() {
            tracing::warn!(%warning, "suspicious map graph config");
        }
    }
}
