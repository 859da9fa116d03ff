//! # Mapgate
//!
//! Access gating for multiplayer game servers.
//!
//! Mapgate decides three things for an incoming request:
//!
//! 1. Is it a privileged (editor/admin) request?
//! 2. Is the claimed player identity well-formed?
//! 3. Do the player's held tokens entitle them to load a given map,
//!    including every map on that map's prerequisite chain?
//!
//! It also owns the reversible codec used for identities on the wire.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapgate::prelude::*;
//!
//! # async fn run() -> Result<(), GateError> {
//! let gate = Gatekeeper::load("mapgate.json").await?.install()?;
//!
//! let request = [("ed", "0")];
//! let caller = gate.admit(&request, &"a".repeat(64))?;
//! let held: HeldTokens = ["hub_clear"].into_iter().collect();
//! if gate.has_all_tokens("cave", &held) {
//!     // let `caller` load the map
//! }
//! # let _ = caller;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod gatekeeper;

pub use config::GatekeeperConfig;
pub use error::GateError;
pub use gatekeeper::{Admission, Gatekeeper, GatekeeperBuilder, gatekeeper};

pub use mapgate_codec::{Codec, CodecError, SubstitutionCodec};
pub use mapgate_graph::{
    ChainDenial, GraphConfig, GraphError, HeldTokens, MapGraph, MapId,
    TokenChainAuthorizer, TokenId, ValidationMode,
};
pub use mapgate_identity::{
    IdentityError, RequestAuthorizer, RequestMetadata, Username,
    generate_username, short_name, validate_username,
};

/// Everything a game server typically needs, in one import.
pub mod prelude {
    pub use crate::{
        Admission, ChainDenial, GateError, Gatekeeper, GatekeeperConfig,
        GraphConfig, HeldTokens, MapId, RequestMetadata, TokenId, gatekeeper,
    };
}
