//! The persisted substitution alphabet.
//!
//! Every encoded identity ever written depends on this exact table. Changing
//! a single entry makes previously encoded values decode to garbage, so any
//! change must come with a bump of [`ALPHABET_VERSION`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// Version of [`DECODE_TABLE`]. Bump when the table changes.
pub const ALPHABET_VERSION: u32 = 1;

/// Two-character code → plaintext character.
///
/// Codes are unique, and so are the characters they map to. The
/// encode direction is derived from this table, never written by hand.
pub const DECODE_TABLE: [(&str, char); 41] = [
    ("04", '_'),
    ("da", '-'),
    ("6e", '/'),
    ("af", ':'),
    ("9a", '.'),
    ("86", 'z'),
    ("d4", 'y'),
    ("67", 'x'),
    ("88", 'w'),
    ("5b", 'v'),
    ("ab", 'u'),
    ("8b", 't'),
    ("4d", 's'),
    ("d5", 'r'),
    ("ba", 'q'),
    ("b7", 'p'),
    ("52", 'o'),
    ("cd", 'n'),
    ("f1", 'm'),
    ("e6", 'l'),
    ("cc", 'k'),
    ("ea", 'j'),
    ("nb", 'i'),
    ("0f", 'h'),
    ("3e", 'g'),
    ("23", 'f'),
    ("a3", 'e'),
    ("be", 'd'),
    ("cf", 'c'),
    ("a8", 'b'),
    ("f9", 'a'),
    ("b1", '9'),
    ("fc", '8'),
    ("d1", '7'),
    ("ff", '6'),
    ("6d", '5'),
    ("c4", '4'),
    ("0e", '3'),
    ("46", '2'),
    ("9d", '1'),
    ("20", '0'),
];

// Built on first use and read-only for the rest of the process.
static DECODE: LazyLock<HashMap<&'static str, char>> =
    LazyLock::new(|| DECODE_TABLE.iter().copied().collect());

static ENCODE: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    DECODE_TABLE.iter().map(|&(code, ch)| (ch, code)).collect()
});

/// Looks up the code for a plaintext character.
pub(crate) fn code_for(ch: char) -> Option<&'static str> {
    ENCODE.get(&ch).copied()
}

/// Looks up the plaintext character for a two-character code.
pub(crate) fn char_for(code: &str) -> Option<char> {
    DECODE.get(code).copied()
}

/// Iterates over every character the codec can encode, in table order.
pub fn alphabet() -> impl Iterator<Item = char> {
    DECODE_TABLE.iter().map(|&(_, ch)| ch)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_decode_table_codes_are_unique() {
        let codes: HashSet<&str> =
            DECODE_TABLE.iter().map(|&(code, _)| code).collect();
        assert_eq!(codes.len(), DECODE_TABLE.len());
    }

    #[test]
    fn test_decode_table_values_are_unique() {
        // If two codes shared a value the encode table would silently
        // drop one of them and the mapping would stop being a bijection.
        let values: HashSet<char> = alphabet().collect();
        assert_eq!(values.len(), DECODE_TABLE.len());
    }

    #[test]
    fn test_decode_table_codes_are_two_ascii_chars() {
        for (code, _) in DECODE_TABLE {
            assert_eq!(code.len(), 2, "code {code:?}");
            assert!(code.is_ascii(), "code {code:?}");
        }
    }

    #[test]
    fn test_encode_table_is_inverse_of_decode_table() {
        assert_eq!(ENCODE.len(), DECODE.len());
        for (code, ch) in DECODE_TABLE {
            assert_eq!(code_for(ch), Some(code));
            assert_eq!(char_for(code), Some(ch));
        }
    }

    #[test]
    fn test_alphabet_covers_letters_digits_and_punctuation() {
        let alpha: HashSet<char> = alphabet().collect();
        for ch in ('a'..='z').chain('0'..='9') {
            assert!(alpha.contains(&ch), "missing {ch}");
        }
        for ch in ['_', '-', '/', ':', '.'] {
            assert!(alpha.contains(&ch), "missing {ch}");
        }
        assert!(!alpha.contains(&'A'));
    }
}
