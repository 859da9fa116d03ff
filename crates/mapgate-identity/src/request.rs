//! Privileged-request detection.
//!
//! Editor and admin tooling talks to the same endpoints as game clients.
//! Such requests identify themselves with two headers:
//!
//! - `ed: 1`: "this request comes from an editor"
//! - `au: <secret hash>`: proof that the editor is ours
//!
//! Both must be present and correct. Anything else is an ordinary request.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use subtle::ConstantTimeEq;

use crate::IdentityError;

/// Header carrying the editor flag.
pub const EDIT_HEADER: &str = "ed";

/// Header carrying the authorizer secret.
pub const AUTH_HEADER: &str = "au";

/// Read access to request headers.
///
/// Implemented for the common map types so callers can hand over whatever
/// their HTTP stack gives them. Header names are looked up exactly as
/// given; HTTP stacks normalize names to lowercase, which is what
/// [`EDIT_HEADER`] and [`AUTH_HEADER`] are.
pub trait RequestMetadata {
    /// Returns the value of header `name`, if present.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> RequestMetadata for HashMap<String, String, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl RequestMetadata for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl RequestMetadata for [(&str, &str)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|&(_, v)| v)
    }
}

impl<const N: usize> RequestMetadata for [(&str, &str); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

/// Decides whether a request carries elevated privilege.
///
/// The secret comparison is constant-time so response timing doesn't leak
/// how much of a guessed secret was right.
#[derive(Clone)]
pub struct RequestAuthorizer {
    secret_hash: String,
}

impl RequestAuthorizer {
    /// Creates an authorizer that accepts `secret_hash` in the `au` header.
    ///
    /// # Errors
    /// Returns [`IdentityError::EmptySecret`] if the secret is empty.
    pub fn new(secret_hash: impl Into<String>) -> Result<Self, IdentityError> {
        let secret_hash = secret_hash.into();
        if secret_hash.is_empty() {
            return Err(IdentityError::EmptySecret);
        }
        Ok(Self { secret_hash })
    }

    /// Returns `true` iff `ed` is exactly `"1"` and `au` exactly matches
    /// the configured secret.
    ///
    /// A missing `ed` counts as `"0"`; a missing `au` never matches.
    pub fn is_authorized<M>(&self, request: &M) -> bool
    where
        M: RequestMetadata + ?Sized,
    {
        let ed = request.header(EDIT_HEADER).unwrap_or("0");
        if ed != "1" {
            return false;
        }

        let Some(au) = request.header(AUTH_HEADER) else {
            tracing::debug!("editor request without authorizer header");
            return false;
        };

        // `ct_eq` on slices of different lengths returns false without
        // comparing contents, so the length is the only thing that leaks.
        let matches: bool =
            au.as_bytes().ct_eq(self.secret_hash.as_bytes()).into();
        if !matches {
            tracing::warn!("editor request with wrong authorizer secret");
        }
        matches
    }
}

// Never print the secret, not even in debug output.
impl fmt::Debug for RequestAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAuthorizer")
            .field("secret_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "4f2a9c";

    fn authorizer() -> RequestAuthorizer {
        RequestAuthorizer::new(SECRET).expect("non-empty secret")
    }

    #[test]
    fn test_is_authorized_both_headers_correct_returns_true() {
        let req = [("ed", "1"), ("au", SECRET)];
        assert!(authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_wrong_secret_returns_false() {
        let req = [("ed", "1"), ("au", "4f2a9d")];
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_secret_prefix_returns_false() {
        let req = [("ed", "1"), ("au", "4f2a")];
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_ed_not_one_returns_false() {
        for ed in ["0", "2", "true", "", " 1"] {
            let req = [("ed", ed), ("au", SECRET)];
            assert!(!authorizer().is_authorized(&req), "ed = {ed:?}");
        }
    }

    #[test]
    fn test_is_authorized_missing_ed_returns_false() {
        let req = [("au", SECRET)];
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_missing_au_returns_false() {
        let req = [("ed", "1")];
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_no_headers_returns_false() {
        let req: [(&str, &str); 0] = [];
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_accepts_hashmap_metadata() {
        let mut req = HashMap::new();
        req.insert("ed".to_string(), "1".to_string());
        req.insert("au".to_string(), SECRET.to_string());
        assert!(authorizer().is_authorized(&req));
    }

    #[test]
    fn test_is_authorized_accepts_btreemap_metadata() {
        let req: BTreeMap<String, String> =
            [("ed".to_string(), "0".to_string())].into_iter().collect();
        assert!(!authorizer().is_authorized(&req));
    }

    #[test]
    fn test_new_empty_secret_returns_error() {
        assert_eq!(
            RequestAuthorizer::new("").unwrap_err(),
            IdentityError::EmptySecret
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let out = format!("{:?}", authorizer());
        assert!(!out.contains(SECRET));
        assert!(out.contains("redacted"));
    }
}
