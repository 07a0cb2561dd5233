//! `envcfg show` — resolve the configuration and print it.

use anyhow::{Context, Result};
use colored::Colorize;

use envcfg_core::config::{self, Config, LoadOptions, SETTINGS};

use crate::helpers;

/// Run the show command.
pub fn run(options: &LoadOptions, json: bool, reveal_secrets: bool) -> Result<()> {
    let resolved = config::load_config(options).context("failed to resolve configuration")?;
    let config = config::init(resolved)?;

    if json {
        println!("{}", render_json(config, reveal_secrets)?);
        return Ok(());
    }

    helpers::print_header(&format!("{} configuration", config.app.name));

    let entries = config.entries();
    for spec in SETTINGS {
        let Some(value) = entries.get(spec.path) else {
            continue;
        };
        println!(
            "  {:<24} {} {}",
            spec.path.bold(),
            helpers::display_value(value, spec.secret && !reveal_secrets),
            format!("({})", spec.name).dimmed()
        );
    }
    println!();

    Ok(())
}

/// Pretty-printed JSON document, secrets masked unless revealed.
fn render_json(config: &Config, reveal_secrets: bool) -> Result<String> {
    let mut document = serde_json::to_value(config)?;
    if !reveal_secrets {
        helpers::mask_secrets(&mut document);
    }
    Ok(serde_json::to_string_pretty(&document)?)
}
