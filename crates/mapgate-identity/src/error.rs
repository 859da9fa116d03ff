//! Error types for the identity layer.

/// Errors describing why an identity or authorizer setting was rejected.
///
/// The public predicates ([`validate_username`](crate::validate_username),
/// [`RequestAuthorizer::is_authorized`](crate::RequestAuthorizer::is_authorized))
/// only answer yes or no. These variants exist for callers that want to
/// say *why*, e.g. in a rejection log line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// A username must be exactly [`USERNAME_LEN`](crate::USERNAME_LEN)
    /// characters long.
    #[error("username has {len} characters, expected {expected}", expected = crate::USERNAME_LEN)]
    WrongLength { len: usize },

    /// A username may only contain lowercase ASCII letters.
    #[error("username character {ch:?} at position {position} is not a lowercase letter")]
    InvalidCharacter { ch: char, position: usize },

    /// The configured authorizer secret is empty.
    /// An empty secret would let any request with an empty `au` header in.
    #[error("authorizer secret must not be empty")]
    EmptySecret,
}
