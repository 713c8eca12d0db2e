use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_core::{CryptoRng, RngCore};

use crate::models::CharacterClass;

/// Shortest password we hand out: one character per drawable class.
pub const MIN_GENERATED_LENGTH: usize = 4;

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, length: usize) -> String {
        generate_with(&mut OsRng, length)
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Generate a password from the OS CSPRNG
pub fn generate_password(length: usize) -> String {
    generate_with(&mut OsRng, length)
}

/// Build a password of `max(length, 4)` characters from a caller-supplied CSPRNG.
///
/// One character is drawn from each of upper, lower, digit and special; the
/// rest come uniformly from their union, then the whole sequence is shuffled.
pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R, length: usize) -> String {
    let length = length.max(MIN_GENERATED_LENGTH);

    let all_chars: Vec<u8> = CharacterClass::DRAWABLE
        .iter()
        .flat_map(|class| class.charset().iter().copied())
        .collect();

    let mut password: Vec<u8> = Vec::with_capacity(length);

    // Ensure at least one character from each group
    for class in CharacterClass::DRAWABLE {
        let charset = class.charset();
        password.push(charset[rng.gen_range(0..charset.len())]);
    }

    for _ in MIN_GENERATED_LENGTH..length {
        password.push(all_chars[rng.gen_range(0..all_chars.len())]);
    }

    password.shuffle(rng);

    password.into_iter().map(char::from).collect()
}
