//! Environment snapshot — the only input source of the loader.
//!
//! The process environment is copied once into an [`EnvSnapshot`]; every
//! resolution afterwards reads from that copy instead of `std::env`.
//!
//! # Precedence
//! 1. Variables from the `.env` file (if enabled and present)
//! 2. Process environment variables (override the file)

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, warn};

use super::error::{ConfigError, ValueKind};

/// Immutable copy of the environment variables visible at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
    /// Variables whose value is not valid UTF-8.
    non_unicode: HashSet<String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        let env = Self::from_os_pairs(std::env::vars_os());
        debug!(count = env.len(), "captured process environment");
        env
    }

    /// Build a snapshot from raw OS strings.
    ///
    /// Names that are not valid UTF-8 cannot be asked for and are skipped.
    /// Values that are not valid UTF-8 are remembered so that resolving them
    /// fails with `InvalidFormat` instead of looking unset.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::default();
        for (key, value) in pairs {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    env.vars.insert(key, value);
                }
                Err(_) => {
                    warn!(name = %key, "environment variable value is not valid UTF-8");
                    env.non_unicode.insert(key);
                }
            }
        }
        env
    }

    /// Build a snapshot from literal pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_unicode: HashSet::new(),
        }
    }

    /// Fill in variables from a dotenv file without overriding existing ones.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn with_env_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                debug!("No env file at {}, skipping", path.display());
                return Ok(self);
            }
            Err(source) => {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut added = 0usize;
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
            if !self.vars.contains_key(&key) && !self.non_unicode.contains(&key) {
                self.vars.insert(key, value);
                added += 1;
            }
        }
        debug!(added, "loaded env file {}", path.display());
        Ok(self)
    }

    /// Raw value of a variable, if set (possibly empty).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Raw value of a variable, possibly empty.
    ///
    /// Fails if the variable is set to something that is not valid UTF-8.
    pub(crate) fn lookup(&self, name: &str, kind: ValueKind) -> Result<Option<&str>, ConfigError> {
        if self.non_unicode.contains(name) {
            return Err(ConfigError::invalid(name, kind, "value is not valid UTF-8"));
        }
        Ok(self.get(name))
    }

    /// Like [`lookup`](Self::lookup), treating an empty value as unset.
    pub(crate) fn non_empty(&self, name: &str, kind: ValueKind) -> Result<Option<&str>, ConfigError> {
        Ok(self.lookup(name, kind)?.filter(|v| !v.is_empty()))
    }

    pub fn len(&self) -> usize {
        self.vars.len() + self.non_unicode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
