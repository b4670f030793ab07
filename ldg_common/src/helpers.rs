use std::env;

use log::*;

use crate::Secret;

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Reads `name` from the environment, logging and returning `default` if it is missing or blank.
pub fn env_or_default(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => s,
        _ => {
            info!("🪛️ {name} is not set. Using the default value, '{default}'.");
            default.to_string()
        },
    }
}

/// Reads a secret from the environment. Blank values are treated as missing.
pub fn secret_from_env(name: &str) -> Option<Secret<String>> {
    env::var(name).ok().filter(|s| !s.trim().is_empty()).map(Secret::new)
}

/// PEM keys stored in a single environment variable usually carry literal `\n` sequences instead of line breaks.
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}
