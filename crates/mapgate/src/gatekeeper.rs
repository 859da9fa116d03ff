//! `Gatekeeper` builder and the admission flow.
//!
//! This is the entry point a game server talks to. It ties together all
//! the layers: identity codec → request/identity checks → map graph.
//!
//! ```text
//! request ──admit()──→ Admission ──has_all_tokens(map, held)──→ bool
//! ```

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use mapgate_codec::{Codec, SubstitutionCodec};
use mapgate_graph::{
    ChainDenial, GraphConfig, HeldTokens, MapId, TokenChainAuthorizer,
};
use mapgate_identity::{
    RequestAuthorizer, RequestMetadata, Username, short_name,
};

use crate::{GateError, GatekeeperConfig};

/// The process-wide gatekeeper, once installed.
static GATEKEEPER: OnceLock<Gatekeeper> = OnceLock::new();

/// Returns the gatekeeper installed with [`Gatekeeper::install`], if any.
pub fn gatekeeper() -> Option<&'static Gatekeeper> {
    GATEKEEPER.get()
}

// ---------------------------------------------------------------------------
// Admission
// ---------------------------------------------------------------------------

/// A caller that passed the identity gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// The claimed username, exactly as sent.
    pub username: String,
    /// Whether the request carried the editor secret.
    pub authorized: bool,
}

impl Admission {
    /// Log-friendly prefix of the username.
    pub fn short_name(&self) -> &str {
        short_name(&self.username)
    }
}

// ---------------------------------------------------------------------------
// GatekeeperBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`Gatekeeper`].
///
/// # Example
///
/// ```rust
/// use mapgate::{Gatekeeper, GraphConfig, HeldTokens};
///
/// let gate = Gatekeeper::builder()
///     .authorizer_hash("s3cret")
///     .graph(
///         GraphConfig::default()
///             .with_map("hub", "")
///             .with_map("cave", "hub_clear")
///             .with_source("hub_clear", "hub"),
///     )
///     .build()
///     .unwrap();
///
/// let held: HeldTokens = ["hub_clear"].into_iter().collect();
/// assert!(gate.has_all_tokens("cave", &held));
/// ```
#[derive(Default)]
pub struct GatekeeperBuilder {
    authorizer_hash: String,
    graph: GraphConfig,
}

impl fmt::Debug for GatekeeperBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatekeeperBuilder")
            .field("authorizer_hash", &"<redacted>")
            .field("graph", &self.graph)
            .finish()
    }
}

impl GatekeeperBuilder {
    /// Creates a new builder with an empty graph and no secret.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the secret privileged requests must present.
    pub fn authorizer_hash(mut self, hash: impl Into<String>) -> Self {
        self.authorizer_hash = hash.into();
        self
    }

    /// Sets the map/token graph.
    pub fn graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }

    /// Takes both settings from a loaded config.
    pub fn config(self, config: GatekeeperConfig) -> Self {
        self.authorizer_hash(config.authorizer_hash).graph(config.graph)
    }

    /// Builds a gatekeeper using the standard [`SubstitutionCodec`].
    ///
    /// # Errors
    /// - [`GateError::Identity`]: the secret is empty
    /// - [`GateError::Graph`]: the graph config is invalid
    pub fn build(self) -> Result<Gatekeeper, GateError> {
        self.build_with_codec(SubstitutionCodec)
    }

    /// Builds a gatekeeper with a custom identity codec.
    pub fn build_with_codec<C: Codec>(
        self,
        codec: C,
    ) -> Result<Gatekeeper<C>, GateError> {
        let requests = RequestAuthorizer::new(self.authorizer_hash)?;
        let chain = TokenChainAuthorizer::from_config(self.graph)?;

        tracing::info!(
            maps = chain.graph().maps().count(),
            mixing_groups = chain.graph().mixing_groups().len(),
            mode = ?chain.mode(),
            max_depth = chain.max_depth(),
            "gatekeeper built"
        );

        Ok(Gatekeeper {
            requests,
            chain,
            codec,
        })
    }
}

// ---------------------------------------------------------------------------
// Gatekeeper
// ---------------------------------------------------------------------------

/// All access checks for one server process.
///
/// Immutable once built. Share it behind an `Arc`, or install it once
/// with [`install`](Gatekeeper::install) and read it from anywhere via
/// [`gatekeeper()`].
#[derive(Debug)]
pub struct Gatekeeper<C: Codec = SubstitutionCodec> {
    requests: RequestAuthorizer,
    chain: TokenChainAuthorizer,
    codec: C,
}

impl Gatekeeper {
    /// Creates a new builder.
    pub fn builder() -> GatekeeperBuilder {
        GatekeeperBuilder::new()
    }

    /// Builds a gatekeeper from a parsed config.
    pub fn from_config(config: GatekeeperConfig) -> Result<Self, GateError> {
        Self::builder().config(config).build()
    }

    /// Reads and parses a JSON config file, then builds a gatekeeper.
    ///
    /// # Errors
    /// - [`GateError::Io`]: the file couldn't be read
    /// - [`GateError::Parse`]: the JSON doesn't match the schema
    /// - anything [`GatekeeperBuilder::build`] returns
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|source| {
            GateError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!(path = %path.display(), "loading gatekeeper config");
        Self::from_config(GatekeeperConfig::from_json(&json)?)
    }

    /// Makes this gatekeeper the process-wide one.
    ///
    /// # Errors
    /// Returns [`GateError::AlreadyInstalled`] on every call after the
    /// first; the installed gatekeeper is never replaced.
    pub fn install(self) -> Result<&'static Gatekeeper, GateError> {
        if GATEKEEPER.set(self).is_err() {
            return Err(GateError::AlreadyInstalled);
        }
        tracing::info!("gatekeeper installed");
        GATEKEEPER.get().ok_or(GateError::AlreadyInstalled)
    }
}

impl<C: Codec> Gatekeeper<C> {
    /// Returns `true` if the request carries the editor flag and secret.
    pub fn is_authorized<M>(&self, request: &M) -> bool
    where
        M: RequestMetadata + ?Sized,
    {
        self.requests.is_authorized(request)
    }

    /// Runs both identity gates for an incoming request.
    ///
    /// Privileged requests are admitted under any claimed name. Everyone
    /// else needs a well-formed username.
    ///
    /// # Errors
    /// Returns [`GateError::Identity`] with the reason the claimed name
    /// was rejected.
    pub fn admit<M>(&self, request: &M, claimed: &str) -> Result<Admission, GateError>
    where
        M: RequestMetadata + ?Sized,
    {
        let authorized = self.requests.is_authorized(request);
        if !authorized {
            Username::parse(claimed).inspect_err(|e| {
                tracing::info!(name = short_name(claimed), error = %e, "admission refused");
            })?;
        }

        tracing::debug!(name = short_name(claimed), authorized, "caller admitted");
        Ok(Admission {
            username: claimed.to_owned(),
            authorized,
        })
    }

    /// One-hop check: does the caller hold `map`'s own token?
    pub fn has_token_for_map(&self, map: &str, held: &HeldTokens) -> bool {
        self.chain.has_token_for_map(map, held)
    }

    /// Full check: is every token on `map`'s prerequisite chain held?
    pub fn has_all_tokens(&self, map: &str, held: &HeldTokens) -> bool {
        self.chain.has_all_tokens(map, held)
    }

    /// Full check with the denial reason.
    pub fn evaluate(&self, map: &str, held: &HeldTokens) -> Result<(), ChainDenial> {
        self.chain.evaluate(map, held)
    }

    /// The mixing group `map` belongs to, or a group of just `map`.
    pub fn mixing_for_map(&self, map: &str) -> Cow<'_, [MapId]> {
        self.chain.graph().mixing_for_map(map)
    }

    /// Encodes an identity for sending to a client.
    pub fn encode_identity(&self, plain: &str) -> Result<String, GateError> {
        Ok(self.codec.encode(plain)?)
    }

    /// Decodes an identity received from a client.
    pub fn decode_identity(&self, encoded: &str) -> Result<String, GateError> {
        Ok(self.codec.decode(encoded)?)
    }

    pub fn chain(&self) -> &TokenChainAuthorizer {
        &self.chain
    }
}
