//! Identity checks for Mapgate.
//!
//! Two gates sit in front of every map request:
//!
//! 1. **Privileged requests**: is this an editor/admin request carrying
//!    the configured secret? ([`RequestAuthorizer`])
//! 2. **Username format**: is the claimed player identity well-formed?
//!    ([`validate_username`], [`Username`]) Privileged callers skip this.
//!
//! # How it fits in the stack
//!
//! ```text
//! Gatekeeper (above)  ← combines both gates into an admission decision
//!     ↕
//! Identity Layer (this crate)  ← pure predicates over request data
//! ```

mod error;
mod request;
mod username;

pub use error::IdentityError;
pub use request::{AUTH_HEADER, EDIT_HEADER, RequestAuthorizer, RequestMetadata};
pub use username::{
    USERNAME_LEN, Username, generate_username, short_name, validate_username,
};
