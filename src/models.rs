// src/models.rs
use std::fmt;

/// Hex-encoded output of a [`crate::crypto::DigestEngine`].
///
/// Equality is exact and case-sensitive; the engine always produces lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub(crate) fn from_hex_unchecked(hex: String) -> Self {
        Digest(hex)
    }

    /// Parse a digest read from outside (config, store file, CLI).
    ///
    /// Returns `None` for empty input or anything that is not hex.
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Digest(hex.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// A point in the numeric candidate space [0, 10^width)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    pub value: u64,
    pub width: usize,
}

impl Candidate {
    pub fn new(value: u64, width: usize) -> Self {
        Self { value, width }
    }

    /// Zero-padded textual form, e.g. `000042` for width 6.
    pub fn padded(&self) -> String {
        format!("{:0width$}", self.value, width = self.width)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Upper,
    Lower,
    Digit,
    Special,
    Whitespace,
}

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%^&*()-_+=<>?";

impl CharacterClass {
    /// Classes the password generator draws from, in the order it seeds them.
    pub const DRAWABLE: [CharacterClass; 4] = [
        CharacterClass::Upper,
        CharacterClass::Lower,
        CharacterClass::Digit,
        CharacterClass::Special,
    ];

    /// Generator alphabet for this class. Whitespace is never generated.
    pub fn charset(&self) -> &'static [u8] {
        match self {
            CharacterClass::Upper => UPPERCASE,
            CharacterClass::Lower => LOWERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Special => SPECIAL,
            CharacterClass::Whitespace => b"",
        }
    }

    /// Letters use Unicode case; digits are ASCII `0-9` only.
    pub fn classify(c: char) -> CharacterClass {
        if c.is_uppercase() {
            CharacterClass::Upper
        } else if c.is_lowercase() {
            CharacterClass::Lower
        } else if c.is_ascii_digit() {
            CharacterClass::Digit
        } else if c.is_whitespace() {
            CharacterClass::Whitespace
        } else {
            CharacterClass::Special
        }
    }
}
