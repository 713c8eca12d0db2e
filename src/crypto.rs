// src/crypto.rs
use sha2::{Digest as _, Sha256, Sha512};
use thiserror::Error;

use crate::models::Digest;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Digest algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "sha-256" | "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha-512" | "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(CryptoError::AlgorithmUnavailable(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    // Length of the hex encoding, never dependent on input length
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha512 => 128,
        }
    }
}

/// One-way, deterministic hashing of arbitrary bytes into a hex [`Digest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestEngine {
    algorithm: DigestAlgorithm,
}

impl DigestEngine {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    // Build an engine from a configured name such as "SHA-256"
    pub fn from_name(name: &str) -> Result<Self> {
        DigestAlgorithm::from_name(name).map(Self::new)
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn digest_len(&self) -> usize {
        self.algorithm.hex_len()
    }

    pub fn hash(&self, bytes: &[u8]) -> Digest {
        let hex = match self.algorithm {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
        };
        Digest::from_hex_unchecked(hex)
    }

    pub fn hash_password(&self, password: &str) -> Digest {
        self.hash(password.as_bytes())
    }
}

// Hash a password with the default SHA-256 engine
pub fn hash_password(password: &str) -> Digest {
    DigestEngine::default().hash_password(password)
}
