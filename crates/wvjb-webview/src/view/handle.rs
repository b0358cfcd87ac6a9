use std::cell::RefCell;

use wry::WebView;
use wvjb_common::BridgeError;
use wvjb_core::Transport;

/// Handle to the `wry` web view behind a bridge.
///
/// The bridge evaluates scripts through it and holds it weakly; the
/// [`BridgedWebView`](super::BridgedWebView) owns it.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    /// Current URL (best-effort tracking).
    pub(super) current_url: RefCell<String>,
}

impl WebViewHandle {
    pub fn current_url(&self) -> String {
        self.current_url.borrow().clone()
    }

    /// Set the web view bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub(super) fn note_url(&self, url: &str) {
        *self.current_url.borrow_mut() = url.to_string();
    }
}

impl Transport for WebViewHandle {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| BridgeError::Transport(e.to_string()))
    }
}
