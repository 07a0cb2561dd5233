//! `envcfg check` — report every configuration problem at once.
//!
//! Unlike startup assembly, which stops at the first failure, this walks the
//! whole variable table so an operator can fix a deployment in one pass.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use envcfg_core::config::{validate, Config, LoadOptions};

use crate::helpers;

/// Run the check command.
pub fn run(options: &LoadOptions) -> Result<()> {
    let env = options
        .snapshot()
        .context("failed to capture environment")?;

    helpers::print_header("envcfg check");

    let problems = validate(&env);
    debug!(problems = problems.len(), "validated environment");
    if problems.is_empty() {
        let config = Config::from_env(&env).context("failed to resolve configuration")?;
        println!(
            "  {} {} ({})",
            helpers::ok_mark(),
            "Configuration is valid".bold(),
            config.server.bind_addr().dimmed()
        );
        println!();
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {}", helpers::fail_mark(), problem);
    }
    println!();

    bail!("{} configuration problem(s) found", problems.len())
}
