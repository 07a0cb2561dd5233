//! Configuration schema — the resolved, read-only settings of the service.
//!
//! Hierarchy: `Config` → `AppConfig`, `ServerConfig`, `CorsConfig`,
//! `JwtConfig`.
//!
//! Serialized keys are **camelCase** (`allowCredentials`, `dbLink`, ...);
//! the same names form the logical setting paths returned by
//! [`Config::entries`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::settings::ConfigValue;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration, built once from the environment at startup.
///
/// There are no setters: a `Config` is only produced by
/// [`Config::from_env`](crate::config::Config::from_env) and read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub jwt: JwtConfig,
}

impl Config {
    /// Flatten into a map from logical setting path (e.g. `server.port`)
    /// to its resolved value.
    pub fn entries(&self) -> BTreeMap<&'static str, ConfigValue> {
        let mut map = BTreeMap::new();

        map.insert("app.name", ConfigValue::from(self.app.name.as_str()));
        map.insert("app.url", ConfigValue::from(self.app.url.as_str()));
        map.insert("app.dbLink", ConfigValue::from(self.app.db_link.as_str()));
        map.insert("app.redisLink", ConfigValue::from(self.app.redis_link.as_str()));

        map.insert("server.port", ConfigValue::from(u64::from(self.server.port)));
        map.insert("server.host", ConfigValue::from(self.server.host.as_str()));
        map.insert("server.prefix", ConfigValue::from(self.server.prefix.as_str()));

        map.insert("cors.origins", string_list(&self.cors.origins));
        map.insert("cors.methods", string_list(&self.cors.methods));
        map.insert("cors.headers", string_list(&self.cors.headers));
        map.insert("cors.maxAge", ConfigValue::from(self.cors.max_age));
        map.insert(
            "cors.allowCredentials",
            ConfigValue::Boolean(self.cors.allow_credentials),
        );
        map.insert("cors.exposeHeaders", string_list(&self.cors.expose_headers));

        map.insert("jwt.access.secret", ConfigValue::from(self.jwt.access.secret.as_str()));
        map.insert("jwt.access.lifetime", ConfigValue::from(self.jwt.access.lifetime));
        map.insert("jwt.refresh.secret", ConfigValue::from(self.jwt.refresh.secret.as_str()));
        map.insert("jwt.refresh.lifetime", ConfigValue::from(self.jwt.refresh.lifetime));

        map
    }
}

fn string_list(items: &[String]) -> ConfigValue {
    ConfigValue::Json(Value::Array(
        items.iter().cloned().map(Value::String).collect(),
    ))
}

// ─────────────────────────────────────────────
// Application
// ─────────────────────────────────────────────

/// Application identity and backing-store connection strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Service name (`APP_NAME`).
    pub name: String,
    /// Public base URL (`BASE_URL`).
    pub url: String,
    /// Database connection string (`DBLINK`).
    pub db_link: String,
    /// Redis connection string (`REDIS_LINK`).
    pub redis_link: String,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server bind settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Listen address.
    pub host: String,
    /// Path prefix for all routes.
    pub prefix: String,
}

impl ServerConfig {
    /// `host:port` string suitable for a listener.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

// ─────────────────────────────────────────────
// CORS
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
    /// Preflight cache duration, in seconds.
    pub max_age: u64,
    pub allow_credentials: bool,
    pub expose_headers: Vec<String>,
}

// ─────────────────────────────────────────────
// JWT
// ─────────────────────────────────────────────

/// Signing settings for the two token classes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtConfig {
    pub access: TokenConfig,
    pub refresh: TokenConfig,
}

/// Secret and lifetime of one token class.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
    pub secret: String,
    /// Token lifetime, in seconds.
    pub lifetime: u64,
}

impl TokenConfig {
    pub fn lifetime_duration(&self) -> Duration {
        Duration::from_secs(self.lifetime)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
