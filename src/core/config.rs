// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

// Configuration for the toolkit
#[derive(Debug, Clone)]
pub struct Config {
    // Hashing
    pub digest_algorithm: String,

    // Brute force
    pub brute_force_width: usize,
    pub brute_force_workers: usize,
    pub brute_force_target: String,
    /// Algorithm the target digest was produced with. Independent of
    /// `digest_algorithm` so the built-in target stays invertible.
    pub brute_force_algorithm: String,

    // Password Generation
    pub default_password_length: usize,

    // Login
    pub credential_store: PathBuf,
    pub max_login_attempts: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            digest_algorithm: "SHA-256".to_string(),

            brute_force_width: 6,
            brute_force_workers: 1,
            brute_force_target: "a97755204f392b4d8787b38d898671839b4a770a864e52862055cdbdf5bc5bee"
                .to_string(),
            brute_force_algorithm: "SHA-256".to_string(),

            default_password_length: 12,

            credential_store: PathBuf::from("../data/user_hashpwd.csv"),
            max_login_attempts: 0, // unlimited

            log_level: LevelFilter::Warn,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(name) = lookup("DIGEST_ALGORITHM") {
            config.digest_algorithm = name;
        }

        parse_into(&lookup, "BRUTE_FORCE_WIDTH", &mut config.brute_force_width);
        parse_into(&lookup, "BRUTE_FORCE_WORKERS", &mut config.brute_force_workers);
        if let Some(target) = lookup("BRUTE_FORCE_TARGET") {
            config.brute_force_target = target.trim().to_string();
        }
        if let Some(name) = lookup("BRUTE_FORCE_ALGORITHM") {
            config.brute_force_algorithm = name;
        }

        parse_into(&lookup, "DEFAULT_PASSWORD_LENGTH", &mut config.default_password_length);

        if let Some(path) = lookup("CREDENTIAL_STORE") {
            config.credential_store = PathBuf::from(path);
        }
        parse_into(&lookup, "MAX_LOGIN_ATTEMPTS", &mut config.max_login_attempts);

        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => log::warn!("Unknown log level '{}', keeping {}", level, config.log_level),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(val) = lookup(key) {
        match val.trim().parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => log::warn!("Ignoring invalid value '{}' for {}", val, key),
        }
    }
}
