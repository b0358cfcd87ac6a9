//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# WebView JavaScript bridge configuration
# Only override what you want to change -- missing fields use defaults.

[logging]
# Log every message crossing the bridge (SEND / RCVD).
enabled = false
# Messages longer than this are truncated in logs.  16-65536
max_length = 500

[bootstrap]
# Schemes of the bootstrap URLs, e.g. https://__bridge_loaded__.
# wvjbscheme://__bridge_loaded__ is what older pages load.
schemes = ["https", "wvjbscheme"]
# Install the JavaScript counterpart before any page script runs.
inject_at_document_start = true
# Dispatch native messages through setTimeout on the JS side, so that
# alert() inside a JS handler cannot deadlock the web view.
alert_box_safety_timeout = true
# js_version = "1.0.0"

[navigation]
# Prefixes allowed when no navigation delegate is set. Empty allows all.
allowed_prefixes = []
"#
}
