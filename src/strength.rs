// src/strength.rs
use std::collections::HashMap;
use std::fmt;

use crate::models::CharacterClass;

pub const MIN_LENGTH: usize = 12;

/// A single rule a password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    TooShort { length: usize },
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    ContainsWhitespace,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooShort { length } => {
                write!(f, "too short ({} < {} characters)", length, MIN_LENGTH)
            }
            Violation::MissingUppercase => write!(f, "no uppercase letter"),
            Violation::MissingLowercase => write!(f, "no lowercase letter"),
            Violation::MissingDigit => write!(f, "no digit"),
            Violation::ContainsWhitespace => write!(f, "contains whitespace"),
        }
    }
}

/// Fixed rule set: at least 12 characters, upper, lower and digit present,
/// no whitespace anywhere. Special characters are neither required nor
/// forbidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthPolicy;

impl StrengthPolicy {
    pub fn new() -> Self {
        StrengthPolicy
    }

    pub fn evaluate(&self, password: &str) -> bool {
        self.violations(password).is_empty()
    }

    pub fn violations(&self, password: &str) -> Vec<Violation> {
        let mut length = 0;
        let mut has_upper = false;
        let mut has_lower = false;
        let mut has_digit = false;
        let mut has_whitespace = false;

        for c in password.chars() {
            length += 1;
            match CharacterClass::classify(c) {
                CharacterClass::Upper => has_upper = true,
                CharacterClass::Lower => has_lower = true,
                CharacterClass::Digit => has_digit = true,
                CharacterClass::Whitespace => has_whitespace = true,
                CharacterClass::Special => {}
            }
        }

        let mut violations = Vec::new();
        if length < MIN_LENGTH {
            violations.push(Violation::TooShort { length });
        }
        if !has_upper {
            violations.push(Violation::MissingUppercase);
        }
        if !has_lower {
            violations.push(Violation::MissingLowercase);
        }
        if !has_digit {
            violations.push(Violation::MissingDigit);
        }
        if has_whitespace {
            violations.push(Violation::ContainsWhitespace);
        }
        violations
    }

    /// Classify many passwords; repeated inputs collapse into one entry.
    pub fn check_passwords<S: AsRef<str>>(&self, passwords: &[S]) -> HashMap<String, bool> {
        passwords
            .iter()
            .map(|p| (p.as_ref().to_string(), self.evaluate(p.as_ref())))
            .collect()
    }

    /// Classify many passwords, one result per input, in input order.
    pub fn check_passwords_ordered<S: AsRef<str>>(&self, passwords: &[S]) -> Vec<(String, bool)> {
        passwords
            .iter()
            .map(|p| (p.as_ref().to_string(), self.evaluate(p.as_ref())))
            .collect()
    }
}

pub fn is_strong_password(password: &str) -> bool {
    StrengthPolicy.evaluate(password)
}

pub fn check_passwords<S: AsRef<str>>(passwords: &[S]) -> HashMap<String, bool> {
    StrengthPolicy.check_passwords(passwords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_passwords() {
        assert!(!is_strong_password("1234"));
        assert!(!is_strong_password("Abc5"));
        assert!(!is_strong_password("abcdef123456"));
        assert!(is_strong_password("AbCdEf123456"));
        assert!(!is_strong_password("AbCdEf 123456"));
    }

    #[test]
    fn short_passwords_are_never_strong() {
        let composed = "Aa1!Aa1!Aa1";
        for end in 0..=composed.len() {
            assert!(!is_strong_password(&composed[..end]));
        }
    }

    #[test]
    fn special_characters_are_optional() {
        assert!(is_strong_password("Abcdefghijk1"));
        assert!(is_strong_password("Abcdefghij1!@#"));
    }

    #[test]
    fn any_whitespace_rejects() {
        for ws in [" ", "\t", "\n", "\u{00A0}"] {
            let pw = format!("AbCdEf{}123456", ws);
            assert!(!is_strong_password(&pw), "accepted {:?}", pw);
        }
    }

    #[test]
    fn non_ascii_digits_do_not_satisfy_the_digit_rule() {
        let password = "Abcdefghijk\u{00B2}";
        assert!(!StrengthPolicy::new().evaluate(password));
        assert!(StrengthPolicy::new()
            .violations(password)
            .contains(&Violation::MissingDigit));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 11 chars but 20 bytes
        let eleven = format!("É{}1a", "é".repeat(8));
        assert!(eleven.len() > MIN_LENGTH);
        assert!(!is_strong_password(&eleven));
        assert!(is_strong_password(&format!("É{}1a", "é".repeat(9))));
    }

    #[test]
    fn violations_list_every_failed_rule() {
        let policy = StrengthPolicy::new();
        assert_eq!(
            policy.violations("ab 1"),
            vec![
                Violation::TooShort { length: 4 },
                Violation::MissingUppercase,
                Violation::ContainsWhitespace,
            ]
        );
        assert!(policy.violations("AbCdEf123456").is_empty());
    }

    #[test]
    fn batch_collapses_duplicates() {
        let map = check_passwords(&["a", "a"]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&false));
    }

    #[test]
    fn ordered_batch_keeps_every_occurrence() {
        let results = StrengthPolicy::new().check_passwords_ordered(&["a", "AbCdEf123456", "a"]);
        assert_eq!(
            results,
            vec![
                ("a".to_string(), false),
                ("AbCdEf123456".to_string(), true),
                ("a".to_string(), false),
            ]
        );
    }
}
