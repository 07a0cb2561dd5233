//! Typed environment configuration for the API service.
//!
//! Everything the service needs at startup is read from environment
//! variables (optionally seeded from a `.env` file), converted to its target
//! type, and assembled once into an immutable [`config::Config`].

pub mod config;

pub use config::{Config, ConfigError};
