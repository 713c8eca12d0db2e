// src/importers/mod.rs

pub mod csv;

pub use csv::{CredentialStore, StoreError, StoreLoad};
