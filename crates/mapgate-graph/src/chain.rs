//! Token-chain authorization.
//!
//! Entering a map takes more than the token the map itself requires. That
//! token comes from clearing some other map, and entering *that* map has
//! requirements of its own. Access is granted only if every link of the
//! chain is satisfied:
//!
//! ```text
//! cave ──needs──→ hub_clear ──from──→ hub ──needs──→ "" (free)
//!   ✓ holds hub_clear?                 ✓ nothing to hold
//! ```
//!
//! Two predicates are exposed:
//!
//! - [`has_token_for_map`](TokenChainAuthorizer::has_token_for_map):
//!   one hop, the map's own requirement only.
//! - [`has_all_tokens`](TokenChainAuthorizer::has_all_tokens): the whole
//!   chain, each hop checked with the one-hop predicate.
//!
//! Both fail closed: an unknown map, a token nobody grants, or a chain
//! that doesn't end within the depth limit are all denials. Only a broken
//! graph is logged at `warn`; an unknown *requested* map is the caller's
//! problem and stays at `debug`.
//! [`evaluate`](TokenChainAuthorizer::evaluate) returns the reason.

use crate::{ChainDenial, GraphConfig, GraphError, HeldTokens, MapGraph, MapId};

// ---------------------------------------------------------------------------
// ValidationMode
// ---------------------------------------------------------------------------

/// Whether token checks are enforced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Token requirements apply.
    #[default]
    Enforced,
    /// Every token check passes.
    Disabled,
}

impl ValidationMode {
    pub fn is_enforced(self) -> bool {
        matches!(self, Self::Enforced)
    }
}

impl From<bool> for ValidationMode {
    fn from(validate: bool) -> Self {
        if validate { Self::Enforced } else { Self::Disabled }
    }
}

// ---------------------------------------------------------------------------
// TokenChainAuthorizer
// ---------------------------------------------------------------------------

/// Decides map access from a caller's held tokens.
///
/// Stateless between calls: every decision is recomputed from the graph
/// and the tokens passed in. Nothing is memoized, so a cyclic graph is
/// caught by the depth limit on every call rather than once.
#[derive(Debug, Clone)]
pub struct TokenChainAuthorizer {
    graph: MapGraph,
    mode: ValidationMode,
    max_depth: usize,
}

impl TokenChainAuthorizer {
    /// Creates an authorizer over `graph`.
    ///
    /// # Errors
    /// Returns [`GraphError::ZeroDepth`] if `max_depth` is 0.
    pub fn new(
        graph: MapGraph,
        mode: ValidationMode,
        max_depth: usize,
    ) -> Result<Self, GraphError> {
        if max_depth == 0 {
            return Err(GraphError::ZeroDepth);
        }
        Ok(Self {
            graph,
            mode,
            max_depth,
        })
    }

    /// Builds the graph and authorizer from configuration.
    pub fn from_config(config: GraphConfig) -> Result<Self, GraphError> {
        let mode = ValidationMode::from(config.validate_maps);
        let max_depth = config.max_chain_depth;
        Self::new(MapGraph::from_config(config), mode, max_depth)
    }

    pub fn graph(&self) -> &MapGraph {
        &self.graph
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Checks only `map`'s own requirement.
    ///
    /// True if validation is disabled, the map requires nothing, or the
    /// caller holds the required token. An unknown map is denied.
    pub fn has_token_for_map(&self, map: &str, held: &HeldTokens) -> bool {
        match self.check_map(map, held) {
            Ok(()) => true,
            Err(denial) => {
                log_denial(map, &denial);
                false
            }
        }
    }

    /// Checks `map` and every map on its prerequisite chain.
    pub fn has_all_tokens(&self, map: &str, held: &HeldTokens) -> bool {
        match self.evaluate(map, held) {
            Ok(()) => true,
            Err(denial) => {
                log_denial(map, &denial);
                false
            }
        }
    }

    /// Like [`has_all_tokens`](Self::has_all_tokens), but says why access
    /// was denied.
    ///
    /// Structural problems anywhere on the chain are reported before any
    /// missing token. Among missing tokens, the one closest to the root
    /// of the chain is reported.
    pub fn evaluate(&self, map: &str, held: &HeldTokens) -> Result<(), ChainDenial> {
        if !self.mode.is_enforced() {
            return Ok(());
        }

        // Walk from `map` towards the root, collecting every map with a
        // real requirement. The walk ends at the first free map.
        let mut gated: Vec<&str> = Vec::new();
        let mut current = map;
        loop {
            let Some(token) = self.graph.required_token(current) else {
                let id = MapId::from(current);
                return Err(if gated.is_empty() {
                    ChainDenial::UnrecognizedMap(id)
                } else {
                    ChainDenial::UnknownMap(id)
                });
            };
            if token.is_none() {
                break;
            }

            if gated.len() >= self.max_depth {
                return Err(ChainDenial::DepthExceeded {
                    map: MapId::from(map),
                    limit: self.max_depth,
                });
            }

            let source = self
                .graph
                .token_source(token.as_str())
                .ok_or_else(|| ChainDenial::UnknownToken(token.clone()))?;

            gated.push(current);
            current = source.as_str();
        }

        // Root first, so the deepest missing prerequisite is reported.
        gated
            .iter()
            .rev()
            .try_for_each(|hop| self.check_map(hop, held))
    }

    /// One-hop check with the reason kept.
    fn check_map(&self, map: &str, held: &HeldTokens) -> Result<(), ChainDenial> {
        if !self.mode.is_enforced() {
            return Ok(());
        }

        let token = self
            .graph
            .required_token(map)
            .ok_or_else(|| ChainDenial::UnrecognizedMap(MapId::from(map)))?;

        if token.is_none() || held.contains(token.as_str()) {
            Ok(())
        } else {
            Err(ChainDenial::MissingToken {
                map: MapId::from(map),
                token: token.clone(),
            })
        }
    }
}

fn log_denial(map: &str, denial: &ChainDenial) {
    if denial.is_misconfiguration() {
        tracing::warn!(%map, reason = %denial, "map access denied by broken token graph");
    } else {
        tracing::debug!(%map, reason = %denial, "map access denied");
    }
}
