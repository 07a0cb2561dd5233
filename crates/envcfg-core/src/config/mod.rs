//! Configuration system — environment snapshot, resolution, schema, and
//! one-shot startup assembly.
//!
//! # Usage
//! ```no_run
//! use envcfg_core::config::{self, LoadOptions};
//!
//! let cfg = config::load_config(&LoadOptions::default()).expect("invalid environment");
//! let cfg = config::init(cfg).expect("configuration already installed");
//! println!("Listening on {}", cfg.server.bind_addr());
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod resolve;
pub mod schema;
pub mod settings;

// Re-export key types
pub use env::EnvSnapshot;
pub use error::{ConfigError, ValueKind};
pub use resolve::EnvNumber;
pub use loader::{get, init, load_config, state, LoadOptions, ResolutionState};
pub use schema::{AppConfig, Config, CorsConfig, JwtConfig, ServerConfig, TokenConfig};
pub use settings::{validate, ConfigSpec, ConfigValue, Requirement, SETTINGS};
