//! A `wry` web view bundled with its bridge.

mod handle;
mod handlers;
mod types;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;
use wvjb_config::BridgeConfig;
use wvjb_core::{script, Bridge, NavigationForwarder};

use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::IpcMessage;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

use handlers::EventSink;

/// One web view and the bridge bound to it.
///
/// `wry` callbacks only record events; [`BridgedWebView::process_events`]
/// must be called on the owning thread (typically once per event-loop turn)
/// to route them into the bridge.
pub struct BridgedWebView {
    // Declared first so the bridge goes before the view it points at.
    bridge: Bridge,
    handle: Rc<WebViewHandle>,
    events: EventSink,
}

impl BridgedWebView {
    /// Create a web view as a child of `window` and bind a bridge to it.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
        bridge_config: BridgeConfig,
    ) -> Result<Self, wry::Error> {
        let events: EventSink = Arc::new(Mutex::new(Vec::new()));
        let navigation = NavigationForwarder::from_config(&bridge_config);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools);

        if bridge_config.bootstrap.inject_at_document_start {
            let js = script::bridge_script(bridge_config.bootstrap.js_version.as_deref());
            builder = builder.with_initialization_script(&js);
        }

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_ipc_handler(builder, Arc::clone(&events));
        builder = handlers::attach_page_load_handler(builder, Arc::clone(&events));
        builder =
            handlers::attach_navigation_handler(builder, navigation.clone(), Arc::clone(&events));

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder.build_as_child(window)?;
        let handle = Rc::new(WebViewHandle {
            webview,
            current_url: RefCell::new(initial_url),
        });
        let bridge = Bridge::with_navigation(&handle, bridge_config, navigation);

        debug!(bridge = %bridge.id(), url = %handle.current_url(), "bridged web view created");

        Ok(Self {
            bridge,
            handle,
            events,
        })
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn handle(&self) -> &WebViewHandle {
        &self.handle
    }

    /// Route recorded web-view events into the bridge.
    ///
    /// Returns the events the bridge did not consume (page loads, allowed
    /// navigations, IPC of other kinds) so the caller can react to them.
    pub fn process_events(&self) -> Vec<WebViewEvent> {
        let drained = match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => return Vec::new(),
        };

        let unconsumed = route_events(&self.bridge, drained);
        for event in &unconsumed {
            if let WebViewEvent::PageLoad { url, .. } = event {
                self.handle.note_url(url);
            }
        }
        unconsumed
    }
}

/// Feed `events` to `bridge` in order, returning those it does not consume.
///
/// Bridge commands and `wvjb_queue` IPC are consumed, including a malformed
/// queue, which is logged and dropped. Page loads reach the bridge and are
/// returned as well.
pub(crate) fn route_events(bridge: &Bridge, events: Vec<WebViewEvent>) -> Vec<WebViewEvent> {
    let mut unconsumed = Vec::new();
    for event in events {
        match &event {
            WebViewEvent::BridgeCommand(kind) => {
                bridge.handle_bridge_url(*kind);
                continue;
            }
            WebViewEvent::IpcMessage { body } => {
                if let Some(queue) = IpcMessage::from_json(body).and_then(|m| m.bridge_queue()) {
                    if let Err(e) = bridge.flush_message_queue(&queue) {
                        warn!(bridge = %bridge.id(), error = %e, "dropped malformed message queue");
                    }
                    continue;
                }
            }
            WebViewEvent::PageLoad { state, url } => match state {
                PageLoadState::Started => bridge.did_start_navigation(url),
                PageLoadState::Finished => bridge.did_finish_navigation(url),
            },
            WebViewEvent::NavigationRequested { .. } => {}
        }
        unconsumed.push(event);
    }
    unconsumed
}

impl std::fmt::Debug for BridgedWebView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgedWebView")
            .field("bridge", &self.bridge)
            .field("url", &self.handle.current_url())
            .finish()
    }
}
