//! Codec trait and the substitution implementation.
//!
//! A "codec" here converts identity strings between their plain form and
//! the obfuscated form that travels to clients. Callers only depend on the
//! [`Codec`] trait, so the concrete table can be swapped (or versioned)
//! without touching the code that encodes names.

use crate::CodecError;
use crate::table::{char_for, code_for};

/// A reversible string transform.
///
/// ## Trait bounds
///
/// - `Send + Sync` → one codec instance is shared by every request
///   handler, possibly on different threads.
/// - `'static` → it owns (or statically borrows) its tables.
pub trait Codec: Send + Sync + 'static {
    /// Encodes a plaintext string.
    ///
    /// # Errors
    /// Returns `CodecError::InvalidCharacter` if any character has no
    /// image in this codec's alphabet.
    fn encode(&self, plain: &str) -> Result<String, CodecError>;

    /// Decodes a previously encoded string.
    ///
    /// # Errors
    /// Returns `CodecError::TruncatedInput` or `CodecError::UnknownCode`
    /// if the input isn't a sequence of known codes.
    fn decode(&self, encoded: &str) -> Result<String, CodecError>;
}

// ---------------------------------------------------------------------------
// SubstitutionCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that replaces each character with a fixed two-character code.
///
/// The mapping is a bijection between the 41-character alphabet
/// (see [`alphabet`](crate::alphabet)) and its codes, so
/// `decode(encode(s)) == s` for every string over that alphabet.
///
/// ## Example
///
/// ```rust
/// use mapgate_codec::{Codec, SubstitutionCodec};
///
/// let codec = SubstitutionCodec;
///
/// let encoded = codec.encode("ab1").unwrap();
/// assert_eq!(encoded, "f9a89d");
///
/// assert_eq!(codec.decode(&encoded).unwrap(), "ab1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionCodec;

impl Codec for SubstitutionCodec {
    fn encode(&self, plain: &str) -> Result<String, CodecError> {
        // Every code is two bytes, so the output size is known up front.
        let mut out = String::with_capacity(plain.len() * 2);
        for (position, ch) in plain.chars().enumerate() {
            let code = code_for(ch)
                .ok_or(CodecError::InvalidCharacter { ch, position })?;
            out.push_str(code);
        }
        Ok(out)
    }

    fn decode(&self, encoded: &str) -> Result<String, CodecError> {
        let chars: Vec<char> = encoded.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(CodecError::TruncatedInput { len: chars.len() });
        }

        chars
            .chunks(2)
            .enumerate()
            .map(|(position, pair)| {
                let code: String = pair.iter().collect();
                char_for(&code)
                    .ok_or(CodecError::UnknownCode { code, position })
            })
            .collect()
    }
}
