//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` instead of stopping at
//! the first one.

use regex::Regex;
use std::sync::LazyLock;
use wvjb_common::ConfigError;

use crate::schema::BridgeConfig;

/// RFC 3986 scheme syntax.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "logging.max_length",
        config.logging.max_length,
        16,
        65536,
    );

    if config.bootstrap.schemes.is_empty() {
        errors.push("bootstrap.schemes must not be empty".into());
    }
    for (i, scheme) in config.bootstrap.schemes.iter().enumerate() {
        if !SCHEME_RE.is_match(scheme) {
            errors.push(format!(
                "bootstrap.schemes[{i}] = {scheme:?} is not a valid URL scheme"
            ));
        }
    }

    if let Some(version) = &config.bootstrap.js_version {
        if version.trim().is_empty() {
            errors.push("bootstrap.js_version must not be blank".into());
        }
    }

    for (i, prefix) in config.navigation.allowed_prefixes.iter().enumerate() {
        if prefix.trim().is_empty() {
            errors.push(format!("navigation.allowed_prefixes[{i}] is empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
