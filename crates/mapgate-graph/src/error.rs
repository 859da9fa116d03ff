//! Error types for the graph layer.

use crate::{MapId, TokenId};

/// Errors raised while loading graph configuration.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The configuration JSON is malformed or has the wrong shape.
    #[error("invalid graph config: {0}")]
    Parse(#[from] serde_json::Error),

    /// `max_chain_depth` of zero would deny every gated map.
    #[error("max_chain_depth must be at least 1")]
    ZeroDepth,
}

/// Configuration that loads fine but is probably a mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("map {0} appears in more than one mixing group; first group wins")]
    OverlappingMixingGroups(MapId),

    #[error("map {map} requires token {token}, which no map grants")]
    UnsourcedToken { map: MapId, token: TokenId },

    #[error("token {token} is sourced from unknown map {map}")]
    UnknownSourceMap { token: TokenId, map: MapId },
}

/// Why a token-chain check denied access.
///
/// The public predicates collapse every variant to `false`; this type
/// keeps "player lacks a token" apart from "the graph is broken" so the
/// latter can be reported to operators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainDenial {
    /// The player doesn't hold the token `map` requires.
    #[error("map {map} requires token {token}")]
    MissingToken { map: MapId, token: TokenId },

    /// The requested map has no entry in the requirement table.
    ///
    /// The requested name comes from the caller, so this is an ordinary
    /// denial.
    #[error("no such map {0}")]
    UnrecognizedMap(MapId),

    /// A map reached through a token source has no entry in the
    /// requirement table.
    #[error("token chain reaches unknown map {0}")]
    UnknownMap(MapId),

    /// A required token has no source map.
    #[error("token {0} has no source map")]
    UnknownToken(TokenId),

    /// The chain is cyclic or longer than the configured limit.
    #[error("token chain from {map} exceeds {limit} gated maps")]
    DepthExceeded { map: MapId, limit: usize },
}

impl ChainDenial {
    /// Returns `true` if the denial points at broken configuration rather
    /// than at a player who simply lacks a token.
    pub fn is_misconfiguration(&self) -> bool {
        !matches!(
            self,
            Self::MissingToken { .. } | Self::UnrecognizedMap(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_not_misconfiguration() {
        let denial = ChainDenial::MissingToken {
            map: "a".into(),
            token: "x".into(),
        };
        assert!(!denial.is_misconfiguration());
        assert_eq!(denial.to_string(), "map a requires token x");
    }

    #[test]
    fn test_unrecognized_map_is_not_misconfiguration() {
        let denial = ChainDenial::UnrecognizedMap("cvae".into());
        assert!(!denial.is_misconfiguration());
        assert_eq!(denial.to_string(), "no such map cvae");
    }

    #[test]
    fn test_structural_denials_are_misconfiguration() {
        assert!(ChainDenial::UnknownMap("a".into()).is_misconfiguration());
        assert!(ChainDenial::UnknownToken("x".into()).is_misconfiguration());
        assert!(
            ChainDenial::DepthExceeded {
                map: "a".into(),
                limit: 4
            }
            .is_misconfiguration()
        );
    }
}
