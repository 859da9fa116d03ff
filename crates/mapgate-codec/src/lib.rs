//! Identity codec for Mapgate.
//!
//! Player identifiers never cross the wire in plain form. This crate
//! provides the reversible transform used at that boundary:
//!
//! - **Codec** ([`Codec`] trait, [`SubstitutionCodec`]) — the transform
//!   itself.
//! - **Table** ([`DECODE_TABLE`], [`alphabet`], [`ALPHABET_VERSION`]) —
//!   the persisted alphabet the transform is derived from.
//! - **Errors** ([`CodecError`]) — unmapped characters and malformed
//!   encodings.
//!
//! # Architecture
//!
//! ```text
//! plain identity ──encode──→ wire string ──decode──→ plain identity
//! ```

mod codec;
mod error;
mod table;

pub use codec::{Codec, SubstitutionCodec};
pub use error::CodecError;
pub use table::{ALPHABET_VERSION, DECODE_TABLE, alphabet};
