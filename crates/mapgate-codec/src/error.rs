//! Error types for the codec layer.
//!
//! Unlike the authorization predicates, the codec never hides a failure.
//! A character outside the alphabet is a caller bug, and encoding it
//! anyway would corrupt the stored value.

/// Errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The plaintext contains a character the alphabet has no code for.
    ///
    /// `position` is the character index (not the byte index) within the
    /// input, which is what you want when pointing at it in a log line.
    #[error("character {ch:?} at position {position} has no code")]
    InvalidCharacter { ch: char, position: usize },

    /// A two-character group in the encoded input is not a known code.
    #[error("unknown code {code:?} at position {position}")]
    UnknownCode { code: String, position: usize },

    /// Encoded input must consist of whole two-character codes.
    #[error("encoded input has odd length {len}")]
    TruncatedInput { len: usize },
}
