//! Config loader — captures the environment, resolves every setting, and
//! installs the result as process-wide read-only state.
//!
//! # Loading precedence
//! 1. Built-in defaults (optional settings only)
//! 2. `.env` file in the working directory (or `LoadOptions::env_file`)
//! 3. Process environment variables (override the file)
//!
//! Assembly is fail-fast: the first missing or malformed variable aborts it
//! and no partial [`Config`] is ever returned.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::{debug, info};

use super::env::EnvSnapshot;
use super::error::ConfigError;
use super::schema::{AppConfig, Config, CorsConfig, JwtConfig, ServerConfig, TokenConfig};
use super::settings::{
    APP_NAME, BASE_URL, CORS_ALLOW_CREDENTIALS, CORS_EXPOSE_HEADERS, CORS_HEADERS, CORS_MAX_AGE,
    CORS_METHODS, CORS_ORIGINS, DBLINK, JWT_ACCESS_LIFETIME, JWT_ACCESS_SECRET,
    JWT_REFRESH_LIFETIME, JWT_REFRESH_SECRET, REDIS_LINK, SERVER_HOST, SERVER_PORT, SERVER_PREFIX,
};

/// Default dotenv file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Options controlling how the environment snapshot is captured.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Dotenv file to merge under the process environment.
    pub env_file: PathBuf,
    /// Whether to read `env_file` at all.
    pub dotenv: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            dotenv: true,
        }
    }
}

impl LoadOptions {
    /// Capture the snapshot these options describe.
    pub fn snapshot(&self) -> Result<EnvSnapshot, ConfigError> {
        let env = EnvSnapshot::from_process();
        if self.dotenv {
            env.with_env_file(&self.env_file)
        } else {
            debug!("dotenv disabled, using process environment only");
            Ok(env)
        }
    }
}

impl Config {
    /// Resolve every setting from `env` into a `Config`.
    ///
    /// Defaults come from the [`settings`](super::settings) constants.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let app = AppConfig {
            name: APP_NAME.string(env)?,
            url: BASE_URL.string(env)?,
            db_link: DBLINK.string(env)?,
            redis_link: REDIS_LINK.string(env)?,
        };

        let server = ServerConfig {
            port: SERVER_PORT.number(env)?,
            host: SERVER_HOST.string(env)?,
            prefix: SERVER_PREFIX.string(env)?,
        };

        let cors = CorsConfig {
            origins: CORS_ORIGINS.json(env)?,
            methods: CORS_METHODS.json(env)?,
            headers: CORS_HEADERS.json(env)?,
            max_age: CORS_MAX_AGE.number(env)?,
            allow_credentials: CORS_ALLOW_CREDENTIALS.boolean(env)?,
            expose_headers: CORS_EXPOSE_HEADERS.json(env)?,
        };

        let jwt = JwtConfig {
            access: TokenConfig {
                secret: JWT_ACCESS_SECRET.string(env)?,
                lifetime: JWT_ACCESS_LIFETIME.number(env)?,
            },
            refresh: TokenConfig {
                secret: JWT_REFRESH_SECRET.string(env)?,
                lifetime: JWT_REFRESH_LIFETIME.number(env)?,
            },
        };

        Ok(Self {
            app,
            server,
            cors,
            jwt,
        })
    }
}

/// Capture the environment described by `options` and resolve it.
pub fn load_config(options: &LoadOptions) -> Result<Config, ConfigError> {
    let env = options.snapshot()?;
    let config = Config::from_env(&env)?;
    info!(
        app = %config.app.name,
        bind = %config.server.bind_addr(),
        prefix = %config.server.prefix,
        "configuration resolved"
    );
    Ok(config)
}

// ─────────────────────────────────────────────
// Process-wide state
// ─────────────────────────────────────────────

static RESOLVED: OnceLock<Config> = OnceLock::new();

/// Lifecycle of the process-wide configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    Resolved,
}

/// Install `config` as the process-wide configuration.
///
/// Succeeds exactly once per process; later calls return
/// [`ConfigError::AlreadyResolved`] and leave the installed value untouched.
pub fn init(config: Config) -> Result<&'static Config, ConfigError> {
    let mut installed = false;
    let resolved = RESOLVED.get_or_init(|| {
        installed = true;
        config
    });
    if installed {
        debug!("process-wide configuration installed");
        Ok(resolved)
    } else {
        Err(ConfigError::AlreadyResolved)
    }
}

/// The process-wide configuration, once [`init`] has run.
pub fn get() -> Option<&'static Config> {
    RESOLVED.get()
}

pub fn state() -> ResolutionState {
    match RESOLVED.get() {
        Some(_) => ResolutionState::Resolved,
        None => ResolutionState::Unresolved,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
