use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;
use wvjb_core::{NavigationForwarder, NavigationOutcome};

use crate::events::{PageLoadState, WebViewEvent};

/// Shared sink the `wry` callbacks push into.
pub(super) type EventSink = Arc<Mutex<Vec<WebViewEvent>>>;

fn push(events: &EventSink, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

/// Decide a navigation and record what the bridge must see.
///
/// Bootstrap URLs are cancelled and queued as commands. Everything else is
/// answered by the forwarder's delegate or allowlist.
pub(super) fn route_navigation(
    navigation: &NavigationForwarder,
    events: &EventSink,
    url: String,
) -> bool {
    match navigation.decide(&url) {
        NavigationOutcome::Intercepted(kind) => {
            debug!(url = %url, ?kind, "bridge command intercepted");
            push(events, WebViewEvent::BridgeCommand(kind));
            false
        }
        NavigationOutcome::Forwarded(decision) => {
            if !decision.is_allowed() {
                warn!(url = %url, "navigation cancelled");
                return false;
            }
            debug!(url = %url, "navigation allowed");
            push(events, WebViewEvent::NavigationRequested { url });
            true
        }
    }
}

/// Queue an IPC body if it is valid JSON.
pub(super) fn route_ipc(events: &EventSink, body: String) {
    if serde_json::from_str::<serde_json::Value>(&body).is_err() {
        warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
        return;
    }
    debug!(body_len = body.len(), "IPC message from JS");
    push(events, WebViewEvent::IpcMessage { body });
}

pub(super) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        route_ipc(&events, request.body().to_string());
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        push(&events, WebViewEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    navigation: NavigationForwarder,
    events: EventSink,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| route_navigation(&navigation, &events, url))
}
