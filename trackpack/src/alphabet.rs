//! # BaseN Numeral Alphabets
//!
//! Platform identifiers are short strings over fixed alphabets. Reading a
//! string as a big-endian numeral in its alphabet turns it into an integer
//! which packs far tighter than the raw characters.
//!
//! The position of a symbol in its alphabet IS its digit value, so the
//! alphabet strings below are part of the wire format: changing the order of
//! a single symbol changes every payload.

use std::fmt;

use crate::bignum::BigUint;

/// Digits, then uppercase, then lowercase. Used for Spotify track IDs.
pub const BASE62: Alphabet = Alphabet::new(
    "base62",
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
);

/// Digits, then uppercase. Used for Amazon ASINs.
pub const BASE36: Alphabet = Alphabet::new("base36", b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");

/// Uppercase, lowercase, digits, `-`, `_`. Used for YouTube video IDs.
pub const BASE64_URL: Alphabet = Alphabet::new(
    "base64url",
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
);

/// Marker for bytes that are not part of an alphabet in the lookup table.
const INVALID_SYMBOL: u8 = 0xFF;

/// Errors from parsing a numeral string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The string contains a character outside the alphabet.
    #[error("invalid {alphabet} character {character:?} at position {position}")]
    InvalidCharacter {
        /// Name of the alphabet being parsed.
        alphabet: &'static str,
        /// The offending character.
        character: char,
        /// Character index of the offending character.
        position: usize,
    },
}

/// An ordered set of ASCII symbols defining a positional numeral system.
#[derive(Clone, Copy)]
pub struct Alphabet {
    name: &'static str,
    symbols: &'static [u8],
    lookup: [u8; 256],
}

impl Alphabet {
    /// Builds an alphabet from its ordered symbols.
    ///
    /// Symbols must be unique ASCII bytes and there must be at least two
    /// and at most 255 of them; this is checked at compile time for the
    /// alphabets defined in this module.
    pub const fn new(name: &'static str, symbols: &'static [u8]) -> Self {
        assert!(symbols.len() >= 2 && symbols.len() < INVALID_SYMBOL as usize);

        let mut lookup = [INVALID_SYMBOL; 256];
        let mut index = 0;
        while index < symbols.len() {
            let symbol = symbols[index];
            assert!(symbol.is_ascii());
            assert!(lookup[symbol as usize] == INVALID_SYMBOL, "duplicate symbol");
            lookup[symbol as usize] = index as u8;
            index += 1;
        }

        Self { name, symbols, lookup }
    }

    /// Human-readable name of the alphabet, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The radix of the numeral system.
    pub fn base(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// The symbol for digit value zero, used for left-padding.
    pub fn zero_symbol(&self) -> char {
        char::from(self.symbols[0])
    }

    /// Digit value of `character`, if it belongs to the alphabet.
    pub fn digit(&self, character: char) -> Option<u32> {
        if !character.is_ascii() {
            return None;
        }
        match self.lookup[character as usize] {
            INVALID_SYMBOL => None,
            digit => Some(u32::from(digit)),
        }
    }

    /// Parses `numeral` as a big-endian number in this alphabet.
    ///
    /// The empty string parses to zero. Any character outside the
    /// alphabet is an error; it is never coerced to a zero digit.
    pub fn decode(&self, numeral: &str) -> Result<BigUint, Error> {
        let mut value = BigUint::zero();

        for (position, character) in numeral.chars().enumerate() {
            let digit = self.digit(character).ok_or(Error::InvalidCharacter {
                alphabet: self.name,
                character,
                position,
            })?;
            value.mul_add_small(self.base(), digit);
        }

        Ok(value)
    }

    /// Renders `value` as the shortest numeral in this alphabet.
    ///
    /// Zero renders as the zero symbol exactly once.
    pub fn encode(&self, value: &BigUint) -> String {
        if value.is_zero() {
            return self.zero_symbol().to_string();
        }

        let mut remaining = value.clone();
        let mut digits = Vec::new();

        while !remaining.is_zero() {
            // The base is never zero, see `Alphabet::new`.
            let Some(digit) = remaining.div_rem_small(self.base()) else {
                break;
            };
            digits.push(self.symbols[digit as usize]);
        }

        digits.iter().rev().map(|&symbol| char::from(symbol)).collect()
    }

    /// Renders `value` left-padded with the zero symbol to at least
    /// `width` characters. Longer renderings are returned unchanged.
    pub fn encode_padded(&self, value: &BigUint, width: usize) -> String {
        pad_left(&self.encode(value), width, self.zero_symbol())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("name", &self.name)
            .field("base", &self.base())
            .finish()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

/// Left-pads `value` with `pad` up to `width` characters.
pub fn pad_left(value: &str, width: usize, pad: char) -> String {
    let length = value.chars().count();
    if length >= width {
        return value.to_string();
    }

    let mut padded: String = std::iter::repeat(pad).take(width - length).collect();
    padded.push_str(value);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(BASE62, 62; "base62")]
    #[test_case(BASE36, 36; "base36")]
    #[test_case(BASE64_URL, 64; "base64url")]
    fn alphabet_sizes(alphabet: Alphabet, expected: u32) {
        assert_eq!(alphabet.base(), expected);
    }

    #[test_case(BASE62, '0'; "base62")]
    #[test_case(BASE36, '0'; "base36")]
    #[test_case(BASE64_URL, 'A'; "base64url")]
    fn zero_symbols(alphabet: Alphabet, expected: char) {
        assert_eq!(alphabet.zero_symbol(), expected);
    }

    #[test_case(BASE36, "Z", 35; "base36 last digit")]
    #[test_case(BASE36, "10", 36; "base36 carry")]
    #[test_case(BASE62, "z", 61; "base62 last digit")]
    #[test_case(BASE62, "a", 36; "base62 lowercase after uppercase")]
    #[test_case(BASE64_URL, "_", 63; "base64url underscore")]
    #[test_case(BASE64_URL, "BA", 64; "base64url carry")]
    #[test_case(BASE64_URL, "0", 52; "base64url digits after letters")]
    fn decode_known_values(alphabet: Alphabet, numeral: &str, expected: u64) {
        assert_eq!(alphabet.decode(numeral).unwrap(), BigUint::from(expected));
    }

    #[test]
    fn decode_empty_is_zero() {
        assert!(BASE62.decode("").unwrap().is_zero());
    }

    #[test]
    fn decode_asin() {
        let value = BASE36.decode("B000002UJE").unwrap();
        assert_eq!(value, BigUint::from(1_117_159_523_485_466u64));
    }

    #[test_case(BASE36, "b000002UJE", 'b', 0; "lowercase in base36")]
    #[test_case(BASE62, "4cOdK2wGL-TKBW3PvgPWqT", '-', 9; "dash in base62")]
    #[test_case(BASE64_URL, "dQw4w9WgX+Q", '+', 9; "plus in base64url")]
    #[test_case(BASE62, "abcé", 'é', 3; "non-ascii")]
    fn decode_rejects_foreign_characters(
        alphabet: Alphabet,
        numeral: &str,
        character: char,
        position: usize,
    ) {
        assert_matches!(
            alphabet.decode(numeral),
            Err(Error::InvalidCharacter { character: c, position: p, .. })
                if c == character && p == position
        );
    }

    #[test]
    fn encode_zero_is_single_zero_symbol() {
        assert_eq!(BASE62.encode(&BigUint::zero()), "0");
        assert_eq!(BASE64_URL.encode(&BigUint::zero()), "A");
    }

    #[test]
    fn encode_strips_leading_zero_symbols() {
        let value = BASE64_URL.decode("AAdQw4w9WgX").unwrap();
        assert_eq!(BASE64_URL.encode(&value), "dQw4w9WgX");
        assert_eq!(BASE64_URL.encode_padded(&value, 11), "AAdQw4w9WgX");
    }

    #[test_case("abc", 5, '0', "00abc"; "pads")]
    #[test_case("abcdef", 5, '0', "abcdef"; "longer unchanged")]
    #[test_case("", 3, 'A', "AAA"; "empty")]
    fn pad_left_cases(value: &str, width: usize, pad: char, expected: &str) {
        assert_eq!(pad_left(value, width, pad), expected);
    }

    proptest! {
        #[test]
        fn base62_numerals_survive(numeral in "[1-9A-Za-z][0-9A-Za-z]{0,21}") {
            let value = BASE62.decode(&numeral).unwrap();
            prop_assert_eq!(BASE62.encode(&value), numeral);
        }

        #[test]
        fn base64url_numerals_survive(numeral in "[B-Za-z0-9_-][A-Za-z0-9_-]{0,10}") {
            let value = BASE64_URL.decode(&numeral).unwrap();
            prop_assert_eq!(BASE64_URL.encode(&value), numeral);
        }
    }
}
