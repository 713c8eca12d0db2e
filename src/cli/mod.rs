// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

use crate::core::Config;

pub mod commands;
pub mod handlers;
pub mod login;

pub use commands::{run_selectors, Selector};
pub use handlers::Context;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Exercises to run: 1 brute force, 2 strength, 3 batch strength, 4 generate.
    /// Runs all four when omitted.
    pub selectors: Vec<String>,

    /// Run the interactive login instead of the exercises
    #[arg(long)]
    pub login: bool,

    /// Credential store file (username,digest per line after a header)
    #[arg(long, env = "CREDENTIAL_STORE")]
    pub store: Option<PathBuf>,

    /// Number of brute-force worker threads
    #[arg(long, short, env = "BRUTE_FORCE_WORKERS")]
    pub workers: Option<usize>,

    /// Digest algorithm (SHA-256 or SHA-512)
    #[arg(long, env = "DIGEST_ALGORITHM")]
    pub algorithm: Option<String>,

    /// Disable colored verdicts
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    // Command line values win over the environment-derived config
    pub fn apply(&self, config: &mut Config) {
        if let Some(store) = &self.store {
            config.credential_store = store.clone();
        }
        if let Some(workers) = self.workers {
            config.brute_force_workers = workers;
        }
        if let Some(algorithm) = &self.algorithm {
            config.digest_algorithm = algorithm.clone();
        }
    }
}
