//! Username format rules.
//!
//! A player's username is a 64-character string of lowercase ASCII
//! letters. Clients generate one on first launch and send it with every
//! request; anything else is either a broken client or someone poking at
//! the server.

use std::fmt;

use rand::Rng;

use crate::IdentityError;

/// Required username length, in characters.
pub const USERNAME_LEN: usize = 64;

/// How many characters of a username go into log lines.
const SHORT_NAME_LEN: usize = 5;

/// A username that passed format validation.
///
/// Holding a `Username` means the string is exactly [`USERNAME_LEN`]
/// lowercase letters. The inner string is never normalized: what was
/// parsed is what you get back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validates `name` and wraps it.
    ///
    /// # Errors
    /// - [`IdentityError::WrongLength`]: not exactly 64 characters
    /// - [`IdentityError::InvalidCharacter`]: first character outside `a`–`z`
    pub fn parse(name: &str) -> Result<Self, IdentityError> {
        let len = name.chars().count();
        if len != USERNAME_LEN {
            return Err(IdentityError::WrongLength { len });
        }

        if let Some((position, ch)) = name
            .chars()
            .enumerate()
            .find(|(_, ch)| !ch.is_ascii_lowercase())
        {
            return Err(IdentityError::InvalidCharacter { ch, position });
        }

        Ok(Self(name.to_owned()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the log-friendly prefix of this username.
    pub fn short(&self) -> &str {
        short_name(&self.0)
    }

    /// Consumes the wrapper, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns `true` if `name` is an acceptable username.
///
/// Callers that already passed the privileged-request check
/// (`already_authorized == true`) bypass the format rules entirely;
/// tools and admin clients use names that don't follow them.
pub fn validate_username(name: &str, already_authorized: bool) -> bool {
    if already_authorized {
        return true;
    }

    match Username::parse(name) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(name = short_name(name), error = %e, "username rejected");
            false
        }
    }
}

/// Returns the first few characters of `name`, for logging.
///
/// Full usernames act as credentials, so they stay out of logs.
pub fn short_name(name: &str) -> &str {
    match name.char_indices().nth(SHORT_NAME_LEN) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Generates a random username that always passes validation.
pub fn generate_username() -> Username {
    let mut rng = rand::rng();
    let name: String = (0..USERNAME_LEN)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect();
    Username(name)
}
