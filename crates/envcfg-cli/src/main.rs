//! envcfg CLI — entry point.
//!
//! # Commands
//!
//! - `envcfg check` — report every missing or malformed variable
//! - `envcfg show [--json] [--reveal-secrets]` — resolve and print the config
//! - `envcfg vars` — list the variables the service reads

mod check;
mod helpers;
mod show;
mod vars;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use envcfg_core::config::loader::DEFAULT_ENV_FILE;
use envcfg_core::config::LoadOptions;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Resolve and inspect the service's environment configuration
#[derive(Parser, Debug)]
#[command(name = "envcfg", version, about, long_about = None)]
struct Cli {
    /// Dotenv file merged under the process environment
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Ignore the dotenv file
    #[arg(long, global = true, default_value_t = false)]
    no_dotenv: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every missing or malformed variable
    Check,

    /// Resolve the configuration and print it
    Show {
        /// Print the nested JSON document
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print secrets and connection strings in clear
        #[arg(long, default_value_t = false)]
        reveal_secrets: bool,
    },

    /// List the variables the service reads
    Vars,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            env_file: self.env_file.clone(),
            dotenv: !self.no_dotenv,
        }
    }
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let options = cli.load_options();
    match cli.command {
        Commands::Check => check::run(&options),
        Commands::Show {
            json,
            reveal_secrets,
        } => show::run(&options, json, reveal_secrets),
        Commands::Vars => vars::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("envcfg=debug,envcfg_core=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_flags() {
        let cli = Cli::try_parse_from(["envcfg", "show", "--json", "--no-dotenv"]).unwrap();
        assert!(cli.no_dotenv);
        assert!(matches!(
            cli.command,
            Commands::Show {
                json: true,
                reveal_secrets: false
            }
        ));
        assert!(!cli.load_options().dotenv);
    }

    #[test]
    fn test_default_env_file() {
        let cli = Cli::try_parse_from(["envcfg", "check"]).unwrap();
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert!(cli.load_options().dotenv);
    }

    #[test]
    fn test_custom_env_file() {
        let cli = Cli::try_parse_from(["envcfg", "--env-file", "deploy/.env.prod", "vars"]).unwrap();
        assert_eq!(cli.load_options().env_file, PathBuf::from("deploy/.env.prod"));
    }
}
