//! Unified error type for Mapgate.

use std::path::PathBuf;

use mapgate_codec::CodecError;
use mapgate_graph::GraphError;
use mapgate_identity::IdentityError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
///
/// Map access decisions never produce one of these: they answer `false`.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Encoding or decoding an identity failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A claimed identity or the authorizer secret was rejected.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The graph configuration is invalid.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The gatekeeper config file isn't valid JSON for the schema.
    #[error("invalid gatekeeper config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config file couldn't be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A gatekeeper was already installed for this process.
    #[error("gatekeeper already installed")]
    AlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codec_error() {
        let err: GateError =
            CodecError::InvalidCharacter { ch: 'A', position: 0 }.into();
        assert!(matches!(err, GateError::Codec(_)));
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn test_from_identity_error() {
        let err: GateError = IdentityError::EmptySecret.into();
        assert!(matches!(err, GateError::Identity(_)));
    }

    #[test]
    fn test_from_graph_error() {
        let err: GateError = GraphError::ZeroDepth.into();
        assert!(matches!(err, GateError::Graph(_)));
        assert!(err.to_string().contains("max_chain_depth"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = GateError::Io {
            path: PathBuf::from("/etc/mapgate.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/etc/mapgate.json"));
    }
}
