//! `envcfg vars` — list every variable with its type and default.

use anyhow::Result;
use colored::Colorize;

use envcfg_core::config::{ConfigSpec, Requirement, SETTINGS};

use crate::helpers;

/// Run the vars command.
pub fn run() -> Result<()> {
    helpers::print_header("Environment variables");

    for spec in SETTINGS {
        println!(
            "  {:<24} {:<8} {}",
            spec.name.bold(),
            spec.kind.as_str(),
            describe(spec)
        );
    }
    println!();

    Ok(())
}

fn describe(spec: &ConfigSpec) -> String {
    let requirement = match spec.requirement {
        Requirement::Required => "required".yellow().to_string(),
        Requirement::Optional(raw) => format!("default {}", raw).dimmed().to_string(),
    };
    if spec.secret {
        format!("{requirement} {}", "(secret)".dimmed())
    } else {
        requirement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envcfg_core::config::settings::find;

    #[test]
    fn test_describe_mentions_default() {
        colored::control::set_override(false);
        assert_eq!(describe(find("SERVER_PORT").unwrap()), "default 3000");
        assert_eq!(describe(find("APP_NAME").unwrap()), "required");
        assert_eq!(describe(find("DBLINK").unwrap()), "required (secret)");
    }
}
