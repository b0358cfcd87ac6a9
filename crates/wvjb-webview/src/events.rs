//! WebView event types.

use serde::{Deserialize, Serialize};
use wvjb_core::BridgeUrl;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events raised by web-view callbacks, drained on the bridge's thread.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// An IPC message was received from JavaScript.
    IpcMessage { body: String },
    /// A bootstrap URL was intercepted and cancelled.
    BridgeCommand(BridgeUrl),
    /// A navigation was allowed through to the page.
    NavigationRequested { url: String },
}
