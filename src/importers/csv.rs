// src/importers/csv.rs
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error loading file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Username to stored digest mapping read from a `username,digest` file.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
    skipped: usize,
}

/// Result of loading a store: either the parsed file, or an empty store plus
/// the reason the file could not be read.
#[derive(Debug)]
pub enum StoreLoad {
    Loaded(CredentialStore),
    Empty {
        store: CredentialStore,
        diagnostic: StoreError,
    },
}

impl StoreLoad {
    /// Treat an unreadable file as fatal.
    pub fn require(self) -> Result<CredentialStore, StoreError> {
        match self {
            StoreLoad::Loaded(store) => Ok(store),
            StoreLoad::Empty { diagnostic, .. } => Err(diagnostic),
        }
    }

    /// Recover from an unreadable file with an empty store, logging why.
    pub fn into_store(self) -> CredentialStore {
        match self {
            StoreLoad::Loaded(store) => store,
            StoreLoad::Empty { store, diagnostic } => {
                log::warn!("{}", diagnostic);
                store
            }
        }
    }

    pub fn diagnostic(&self) -> Option<&StoreError> {
        match self {
            StoreLoad::Loaded(_) => None,
            StoreLoad::Empty { diagnostic, .. } => Some(diagnostic),
        }
    }
}

impl CredentialStore {
    pub fn load(path: &Path) -> StoreLoad {
        let unreadable = |source| StoreError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                return StoreLoad::Empty {
                    store: CredentialStore::default(),
                    diagnostic: unreadable(e),
                }
            }
        };

        match Self::from_reader(BufReader::new(file)) {
            Ok(store) => {
                log::info!(
                    "Loaded {} credential(s) from {}, skipped {} malformed line(s)",
                    store.len(),
                    path.display(),
                    store.skipped
                );
                StoreLoad::Loaded(store)
            }
            Err(e) => StoreLoad::Empty {
                store: CredentialStore::default(),
                diagnostic: unreadable(e),
            },
        }
    }

    /// Parse store lines. The first line is a header and is always skipped;
    /// any other line without exactly two comma-separated fields, or that is
    /// not valid UTF-8, is dropped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut store = CredentialStore::default();

        for (line_num, line_result) in reader.split(b'\n').enumerate() {
            let mut bytes = line_result?;
            if line_num == 0 {
                continue;
            }
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(_) => {
                    log::debug!("Dropping non UTF-8 credential line {}", line_num + 1);
                    store.skipped += 1;
                    continue;
                }
            };

            let mut parts: Vec<&str> = line.split(',').collect();
            // Trailing empty fields do not count, so "bob," has a single field
            while parts.last() == Some(&"") {
                parts.pop();
            }
            if parts.len() != 2 {
                log::debug!("Dropping malformed credential line {}", line_num + 1);
                store.skipped += 1;
                continue;
            }

            let username = parts[0].trim();
            let digest = parts[1].trim();
            store.users.insert(username.to_string(), digest.to_string());
        }

        Ok(store)
    }

    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    // Lines dropped during parsing
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl FromIterator<(String, String)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        CredentialStore {
            users: iter.into_iter().collect(),
            skipped: 0,
        }
    }
}
