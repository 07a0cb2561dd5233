//! Shared CLI helpers — secret masking and status lines.

use colored::Colorize;
use serde_json::Value;

use envcfg_core::config::{ConfigValue, SETTINGS};

/// Placeholder printed instead of a secret value.
pub const MASK: &str = "********";

/// Render a resolved value, masking it if `secret`.
pub fn display_value(value: &ConfigValue, secret: bool) -> String {
    if secret {
        MASK.to_string()
    } else {
        value.to_string()
    }
}

/// Replace every secret setting in a serialized config with [`MASK`].
pub fn mask_secrets(document: &mut Value) {
    for spec in SETTINGS.iter().filter(|s| s.secret) {
        let pointer = format!("/{}", spec.path.replace('.', "/"));
        if let Some(slot) = document.pointer_mut(&pointer) {
            *slot = Value::String(MASK.to_string());
        }
    }
}

/// Print the tool header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", format!("⚙ {title}").cyan().bold());
    println!();
}

pub fn ok_mark() -> String {
    "✓".green().to_string()
}

pub fn fail_mark() -> String {
    "✗".red().to_string()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
