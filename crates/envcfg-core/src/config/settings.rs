//! Declarative table of every environment variable the service reads.
//!
//! Each variable is a named [`ConfigSpec`] constant and the only place its
//! default is written down. [`Config::from_env`](crate::config::Config::from_env)
//! resolves through these constants; [`SETTINGS`] lists them for the
//! non-fail-fast [`validate`] pass and the variable listing. Defaults are kept
//! in their raw textual form and go through the same parsing as values read
//! from the environment.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value};

use super::env::EnvSnapshot;
use super::error::{ConfigError, ValueKind};
use super::resolve::{parse_boolean, parse_json, parse_number, EnvNumber};

// ─────────────────────────────────────────────
// Values
// ─────────────────────────────────────────────

/// A typed value read from the environment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(Number),
    Boolean(bool),
    Json(Value),
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::Number(_) => ValueKind::Number,
            ConfigValue::Boolean(_) => ValueKind::Boolean,
            ConfigValue::Json(_) => ValueKind::Json,
        }
    }

    /// Equivalent JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Number(n) => Value::Number(n.clone()),
            ConfigValue::Boolean(b) => Value::Bool(*b),
            ConfigValue::Json(v) => v.clone(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue::Number(Number::from(n))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::Boolean(b) => write!(f, "{b}"),
            ConfigValue::Json(v) => write!(f, "{v}"),
        }
    }
}

// ─────────────────────────────────────────────
// Specs
// ─────────────────────────────────────────────

/// Whether a variable must be set, and its fallback when it may not be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Required,
    /// Raw default, parsed like an environment value.
    Optional(&'static str),
}

/// Declarative description of one environment variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigSpec {
    /// Logical setting path in the resolved [`Config`](super::Config).
    pub path: &'static str,
    /// Environment variable name.
    pub name: &'static str,
    pub kind: ValueKind,
    pub requirement: Requirement,
    /// Upper bound for numeric settings narrower than `u64`.
    pub max: Option<u64>,
    /// Value must not be displayed or logged.
    pub secret: bool,
}

impl ConfigSpec {
    const fn new(path: &'static str, name: &'static str, kind: ValueKind) -> Self {
        Self {
            path,
            name,
            kind,
            requirement: Requirement::Required,
            max: None,
            secret: false,
        }
    }

    const fn optional(mut self, raw: &'static str) -> Self {
        self.requirement = Requirement::Optional(raw);
        self
    }

    const fn max(mut self, max: u64) -> Self {
        self.max = Some(max);
        self
    }

    const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }

    fn default_raw(&self) -> Option<&'static str> {
        match self.requirement {
            Requirement::Required => None,
            Requirement::Optional(raw) => Some(raw),
        }
    }

    /// Resolve a string setting.
    pub fn string(&self, env: &EnvSnapshot) -> Result<String, ConfigError> {
        match self.default_raw() {
            Some(raw) => Ok(env
                .optional_string(self.name, Some(raw))?
                .unwrap_or_default()),
            None => env.required_string(self.name),
        }
    }

    /// Resolve a numeric setting into `T`.
    pub fn number<T: EnvNumber>(&self, env: &EnvSnapshot) -> Result<T, ConfigError> {
        let default = self
            .default_raw()
            .map(|raw| parse_number::<T>(self.name, raw))
            .transpose()?;
        env.number(self.name, default)
    }

    /// Resolve a boolean setting.
    pub fn boolean(&self, env: &EnvSnapshot) -> Result<bool, ConfigError> {
        env.boolean(self.name, self.default_raw().map(parse_boolean))
    }

    /// Resolve a JSON setting into `T`.
    pub fn json<T: DeserializeOwned>(&self, env: &EnvSnapshot) -> Result<T, ConfigError> {
        let default = self
            .default_raw()
            .map(|raw| parse_json::<T>(self.name, raw))
            .transpose()?;
        env.json(self.name, default)
    }

    /// Resolve this variable against a snapshot, whatever its kind.
    pub fn resolve(&self, env: &EnvSnapshot) -> Result<ConfigValue, ConfigError> {
        match self.kind {
            ValueKind::String => Ok(ConfigValue::String(self.string(env)?)),
            ValueKind::Number => {
                let n: u64 = self.number(env)?;
                match self.max {
                    Some(max) if n > max => Err(ConfigError::invalid(
                        self.name,
                        self.kind,
                        format!("{n} is out of range (0..={max})"),
                    )),
                    _ => Ok(ConfigValue::from(n)),
                }
            }
            ValueKind::Boolean => Ok(ConfigValue::Boolean(self.boolean(env)?)),
            ValueKind::Json => Ok(ConfigValue::Json(self.json(env)?)),
        }
    }
}

pub const APP_NAME: ConfigSpec = ConfigSpec::new("app.name", "APP_NAME", ValueKind::String);
pub const BASE_URL: ConfigSpec = ConfigSpec::new("app.url", "BASE_URL", ValueKind::String);
pub const DBLINK: ConfigSpec = ConfigSpec::new("app.dbLink", "DBLINK", ValueKind::String).secret();
pub const REDIS_LINK: ConfigSpec =
    ConfigSpec::new("app.redisLink", "REDIS_LINK", ValueKind::String).secret();

pub const SERVER_PORT: ConfigSpec = ConfigSpec::new("server.port", "SERVER_PORT", ValueKind::Number)
    .optional("3000")
    .max(u16::MAX as u64);
pub const SERVER_HOST: ConfigSpec =
    ConfigSpec::new("server.host", "SERVER_HOST", ValueKind::String).optional("0.0.0.0");
pub const SERVER_PREFIX: ConfigSpec =
    ConfigSpec::new("server.prefix", "SERVER_PREFIX", ValueKind::String).optional("/api");

pub const CORS_ORIGINS: ConfigSpec =
    ConfigSpec::new("cors.origins", "CORS_ORIGINS", ValueKind::Json).optional("[]");
pub const CORS_METHODS: ConfigSpec =
    ConfigSpec::new("cors.methods", "CORS_METHODS", ValueKind::Json).optional(r#"["GET","POST"]"#);
pub const CORS_HEADERS: ConfigSpec =
    ConfigSpec::new("cors.headers", "CORS_HEADERS", ValueKind::Json).optional("[]");
pub const CORS_MAX_AGE: ConfigSpec =
    ConfigSpec::new("cors.maxAge", "CORS_MAX_AGE", ValueKind::Number).optional("86400");
pub const CORS_ALLOW_CREDENTIALS: ConfigSpec = ConfigSpec::new(
    "cors.allowCredentials",
    "CORS_ALLOW_CREDENTIALS",
    ValueKind::Boolean,
)
.optional("true");
pub const CORS_EXPOSE_HEADERS: ConfigSpec =
    ConfigSpec::new("cors.exposeHeaders", "CORS_EXPOSE_HEADERS", ValueKind::Json).optional("[]");

pub const JWT_ACCESS_SECRET: ConfigSpec =
    ConfigSpec::new("jwt.access.secret", "JWT_ACCESS_SECRET", ValueKind::String).secret();
pub const JWT_ACCESS_LIFETIME: ConfigSpec =
    ConfigSpec::new("jwt.access.lifetime", "JWT_ACCESS_LIFETIME", ValueKind::Number);
pub const JWT_REFRESH_SECRET: ConfigSpec =
    ConfigSpec::new("jwt.refresh.secret", "JWT_REFRESH_SECRET", ValueKind::String).secret();
pub const JWT_REFRESH_LIFETIME: ConfigSpec =
    ConfigSpec::new("jwt.refresh.lifetime", "JWT_REFRESH_LIFETIME", ValueKind::Number);

/// Every variable consumed by [`Config::from_env`](super::Config::from_env),
/// in assembly order.
pub const SETTINGS: &[ConfigSpec] = &[
    APP_NAME,
    BASE_URL,
    DBLINK,
    REDIS_LINK,
    SERVER_PORT,
    SERVER_HOST,
    SERVER_PREFIX,
    CORS_ORIGINS,
    CORS_METHODS,
    CORS_HEADERS,
    CORS_MAX_AGE,
    CORS_ALLOW_CREDENTIALS,
    CORS_EXPOSE_HEADERS,
    JWT_ACCESS_SECRET,
    JWT_ACCESS_LIFETIME,
    JWT_REFRESH_SECRET,
    JWT_REFRESH_LIFETIME,
];

/// Look up a spec by environment variable name.
pub fn find(name: &str) -> Option<&'static ConfigSpec> {
    SETTINGS.iter().find(|spec| spec.name == name)
}

/// Resolve every setting and collect all failures instead of stopping at
/// the first one. Never produces a [`Config`](super::Config).
pub fn validate(env: &EnvSnapshot) -> Vec<ConfigError> {
    SETTINGS
        .iter()
        .filter_map(|spec| spec.resolve(env).err())
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
