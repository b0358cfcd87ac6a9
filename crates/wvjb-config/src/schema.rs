//! Bridge configuration types.
//!
//! Every section is `#[serde(default)]`, so a partial TOML file only needs
//! the keys it overrides.

use serde::{Deserialize, Serialize};

/// Default cap on logged message length, in characters.
pub const DEFAULT_LOG_MAX_LENGTH: u32 = 500;

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub logging: LoggingConfig,
    pub bootstrap: BootstrapConfig,
    pub navigation: NavigationConfig,
}

impl BridgeConfig {
    /// Defaults with message logging switched on.
    pub fn with_logging() -> Self {
        Self {
            logging: LoggingConfig {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Message logging (`SEND` / `RCVD` lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log every message crossing the bridge.
    pub enabled: bool,
    /// Longer messages are truncated (valid range: 16-65536).
    pub max_length: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_length: DEFAULT_LOG_MAX_LENGTH,
        }
    }
}

/// How the JavaScript counterpart is brought up in the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// URL schemes of the bootstrap URLs (`<scheme>://__bridge_loaded__`).
    /// `wvjbscheme` is what older pages use.
    pub schemes: Vec<String>,
    /// Register the counterpart as an initialization script so it exists
    /// before any page script runs.
    pub inject_at_document_start: bool,
    /// Keep the JS side's `setTimeout` wrapper around native message
    /// dispatch, which protects against `alert()` deadlocks.
    pub alert_box_safety_timeout: bool,
    /// Version tag stamped onto the injected counterpart.
    pub js_version: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            schemes: vec!["https".into(), "wvjbscheme".into()],
            inject_at_document_start: true,
            alert_box_safety_timeout: true,
            js_version: None,
        }
    }
}

/// Policy for navigations that are neither bridge URLs nor handled by a
/// caller-supplied delegate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Allowed URL prefixes. Empty means every navigation is allowed.
    pub allowed_prefixes: Vec<String>,
}

impl NavigationConfig {
    /// Check whether a URL passes the allowlist.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.allowed_prefixes.is_empty()
            || self
                .allowed_prefixes
                .iter()
                .any(|prefix| url.starts_with(prefix.as_str()))
    }
}
