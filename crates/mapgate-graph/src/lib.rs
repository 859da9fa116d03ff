//! Map/token graph and token-chain authorization for Mapgate.
//!
//! This crate answers one question: *may this player load this map?*
//!
//! - **Types** ([`MapId`], [`TokenId`], [`HeldTokens`]) — what the graph
//!   is made of, and what a player brings to a check.
//! - **Config** ([`GraphConfig`]) — the static tables, loaded once.
//! - **Graph** ([`MapGraph`]) — read-only lookups plus the mixing-group
//!   resolver.
//! - **Chain** ([`TokenChainAuthorizer`]) — the access decision itself.
//! - **Errors** ([`GraphError`], [`ChainDenial`], [`ConfigWarning`]).
//!
//! # Architecture
//!
//! ```text
//! GraphConfig ──from_config──→ MapGraph ──owned by──→ TokenChainAuthorizer
//!                                                       ↑
//!                           HeldTokens (per call) ──────┘
//! ```

mod chain;
mod config;
mod error;
mod graph;
mod types;

pub use chain::{TokenChainAuthorizer, ValidationMode};
pub use config::{DEFAULT_MAX_CHAIN_DEPTH, GraphConfig};
pub use error::{ChainDenial, ConfigWarning, GraphError};
pub use graph::MapGraph;
pub use types::{HeldTokens, MapId, TokenId};
