//! Error types for environment resolution and config assembly.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Target type of a single environment variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Json,
}

impl ValueKind {
    /// Lowercase name used in messages and the `vars` listing.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Json => "json",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while resolving variables or assembling the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable with no default is unset or empty.
    #[error("missing required {kind} environment variable: {name}")]
    MissingVariable { name: String, kind: ValueKind },
    /// A variable is set but does not parse as its target type.
    #[error("invalid {kind} value for environment variable {name}: {reason}")]
    InvalidFormat {
        name: String,
        kind: ValueKind,
        reason: String,
    },
    /// The `.env` file exists but could not be read or parsed.
    #[error("failed to load env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    /// The process-wide config was already installed.
    #[error("configuration already resolved")]
    AlreadyResolved,
}

impl ConfigError {
    pub(crate) fn missing(name: &str, kind: ValueKind) -> Self {
        ConfigError::MissingVariable {
            name: name.to_string(),
            kind,
        }
    }

    pub(crate) fn invalid(name: &str, kind: ValueKind, reason: impl fmt::Display) -> Self {
        ConfigError::InvalidFormat {
            name: name.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// Name of the offending environment variable, if the error concerns one.
    pub fn variable(&self) -> Option<&str> {
        match self {
            ConfigError::MissingVariable { name, .. } | ConfigError::InvalidFormat { name, .. } => {
                Some(name)
            }
            ConfigError::EnvFile { .. } | ConfigError::AlreadyResolved => None,
        }
    }
}
