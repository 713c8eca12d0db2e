//! Credential-hygiene toolkit: SHA-2 password digests, exhaustive inversion of
//! short numeric secrets, a fixed password strength policy and a CSPRNG-backed
//! password generator. A small credential store and login session sit on top.

pub mod cli;
pub mod core;
pub mod cracker;
pub mod crypto;
pub mod generators;
pub mod importers;
pub mod models;
pub mod strength;

pub use crate::core::config::Config;
pub use crate::cracker::{BruteForcer, CrackError, SearchReport};
pub use crate::crypto::{CryptoError, DigestAlgorithm, DigestEngine};
pub use crate::generators::PasswordGenerator;
pub use crate::importers::{CredentialStore, StoreLoad};
pub use crate::models::{Candidate, CharacterClass, Digest};
pub use crate::strength::{is_strong_password, StrengthPolicy};
