//! `ApplicationHandler` driving one bridged web view.

use std::time::{Duration, Instant};

use serde_json::json;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowAttributes, WindowId};
use wvjb_common::BridgeEvent;
use wvjb_config::BridgeConfig;
use wvjb_core::Bridge;
use wvjb_webview::{BridgedWebView, WebViewConfig, WebViewEvent};

use crate::page::DEMO_HTML;

/// How often web-view events are drained while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub struct DemoApp {
    config: BridgeConfig,
    url: Option<String>,
    // The web view is dropped before the window hosting it.
    view: Option<BridgedWebView>,
    events: Option<broadcast::Receiver<BridgeEvent>>,
    window: Option<Window>,
}

impl DemoApp {
    pub fn new(config: BridgeConfig, url: Option<String>) -> Self {
        Self {
            config,
            url,
            view: None,
            events: None,
            window: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("wvjb demo")
            .with_inner_size(winit::dpi::LogicalSize::new(900.0, 640.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                error!("Failed to create window: {e}");
                return false;
            }
        };

        let content = match &self.url {
            Some(url) => WebViewConfig::with_url(url.clone()),
            None => WebViewConfig::with_html(DEMO_HTML),
        };
        let view = match BridgedWebView::create(
            &window,
            full_bounds(&window),
            content,
            self.config.clone(),
        ) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to create web view: {e}");
                return false;
            }
        };

        install_handlers(view.bridge());
        greet_page(view.bridge());

        self.events = Some(view.bridge().subscribe());
        self.view = Some(view);
        self.window = Some(window);
        true
    }

    fn poll(&mut self) {
        let Some(view) = &self.view else {
            return;
        };

        for event in view.process_events() {
            if let WebViewEvent::IpcMessage { body } = event {
                info!(body_len = body.len(), "unhandled IPC message");
            }
        }

        if let Some(rx) = self.events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                log_bridge_event(&event);
            }
        }
    }
}

fn full_bounds(window: &Window) -> wry::Rect {
    let size = window.inner_size();
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

/// Native handlers the demo page calls.
fn install_handlers(bridge: &Bridge) {
    bridge.register_handler("echo", |data, responder| {
        info!(%data, "echo called from JS");
        responder.respond(data);
    });
}

/// Queued before the page has loaded; delivered once the counterpart is in.
fn greet_page(bridge: &Bridge) {
    let id = bridge.call_handler_with_callback(
        "greet",
        json!({ "from": "rust", "pid": std::process::id() }),
        |response| info!(%response, "JS answered greet"),
    );
    info!(callback_id = %id, "greet queued");
}

fn log_bridge_event(event: &BridgeEvent) {
    match event {
        BridgeEvent::Loaded { flushed } => info!(flushed, "bridge loaded"),
        BridgeEvent::Reset { discarded } => info!(discarded, "bridge reset"),
        BridgeEvent::HandlerNotFound { handler_name } => {
            warn!(handler = %handler_name, "page called a handler that does not exist")
        }
        BridgeEvent::FatalError(e) => error!(error = %e, "bridge failed"),
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let (Some(window), Some(view)) = (&self.window, &self.view) {
                    if let Err(e) = view.handle().set_bounds(full_bounds(window)) {
                        warn!("Failed to resize web view: {e}");
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll();
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
