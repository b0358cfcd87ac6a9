//! The bridge: handler registry, call/response correlation, and the
//! bootstrap handshake with the JavaScript counterpart.
//!
//! A `Bridge` lives on the thread that owns its web view. It is `!Send`
//! by construction; web-view callbacks running elsewhere talk to it through
//! an event queue drained on that thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;
use wvjb_common::{
    BridgeEvent, BridgeId, CallbackId, CallbackIdGenerator, EventBus, FatalError, Result,
};
use wvjb_config::BridgeConfig;

use crate::message::Message;
use crate::navigation::{NavigationDelegate, NavigationForwarder};
use crate::registry::HandlerRegistry;
use crate::transport::Transport;

mod bootstrap;
mod dispatch;
mod responder;


pub use responder::Responder;

/// Callback resolved by the response to an outbound call.
pub(crate) type ResponseCallback = Box<dyn FnOnce(Value)>;

/// Observer notified of fatal bridge errors.
pub(crate) type FatalObserver = Rc<dyn Fn(&FatalError)>;

/// Mutable bridge state. Only borrowed between calls into user code.
pub(crate) struct BridgeState {
    pub(crate) registry: HandlerRegistry,
    pub(crate) pending: HashMap<CallbackId, ResponseCallback>,
    /// Outbound messages held until the counterpart is injected.
    /// `None` once the bridge has loaded.
    pub(crate) startup_queue: Option<Vec<Message>>,
    pub(crate) ids: CallbackIdGenerator,
    pub(crate) js_version: Option<String>,
    pub(crate) fatal_observers: Vec<FatalObserver>,
}

/// Shared core behind [`Bridge`]; responders hold it weakly.
pub(crate) struct BridgeBase {
    pub(crate) id: BridgeId,
    pub(crate) config: BridgeConfig,
    pub(crate) transport: Weak<dyn Transport>,
    pub(crate) state: RefCell<BridgeState>,
    pub(crate) events: EventBus,
    pub(crate) navigation: NavigationForwarder,
}

/// A native/JavaScript message bridge bound to one web view.
pub struct Bridge {
    base: Rc<BridgeBase>,
}

impl Bridge {
    /// Bind a bridge to `transport`.
    ///
    /// Only a weak reference is kept: the caller owns the web view.
    pub fn for_transport<T: Transport + 'static>(transport: &Rc<T>, config: BridgeConfig) -> Self {
        let navigation = NavigationForwarder::from_config(&config);
        Self::with_navigation(transport, config, navigation)
    }

    /// Like [`Bridge::for_transport`], sharing a router created before the
    /// web view existed (web-view builders take their callbacks up front).
    pub fn with_navigation<T: Transport + 'static>(
        transport: &Rc<T>,
        config: BridgeConfig,
        navigation: NavigationForwarder,
    ) -> Self {
        let weak: Weak<dyn Transport> = Rc::downgrade(transport) as Weak<T>;
        let id = BridgeId::new();
        debug!(bridge = %id, "bridge created");

        Self {
            base: Rc::new(BridgeBase {
                id,
                transport: weak,
                state: RefCell::new(BridgeState {
                    registry: HandlerRegistry::new(),
                    pending: HashMap::new(),
                    startup_queue: Some(Vec::new()),
                    ids: CallbackIdGenerator::new(),
                    js_version: config.bootstrap.js_version.clone(),
                    fatal_observers: Vec::new(),
                }),
                events: EventBus::default(),
                navigation,
                config,
            }),
        }
    }

    pub fn id(&self) -> &BridgeId {
        &self.base.id
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.base.config
    }

    // -- Handlers --

    /// Register a native handler callable from JavaScript. Replaces any
    /// handler already registered under `name`.
    pub fn register_handler<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(Value, Responder) + 'static,
    {
        let name = name.into();
        let replaced = self
            .base
            .state
            .borrow_mut()
            .registry
            .register(name.clone(), Rc::new(handler));
        debug!(bridge = %self.base.id, handler = %name, replaced, "handler registered");
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.base.state.borrow().registry.contains(name)
    }

    pub fn handler_count(&self) -> usize {
        self.base.state.borrow().registry.len()
    }

    // -- Outbound calls --

    /// Call a JavaScript handler with no data and no response.
    pub fn call_handler(&self, name: &str) {
        self.base.send(name, Value::Null, None);
    }

    /// Call a JavaScript handler with data and no response.
    pub fn call_handler_with_data(&self, name: &str, data: impl Into<Value>) {
        self.base.send(name, data.into(), None);
    }

    /// Call a JavaScript handler and resolve `callback` with its response.
    ///
    /// `callback` runs at most once. It is dropped unrun if [`Bridge::reset`]
    /// happens first. Returns the correlation id of the call.
    pub fn call_handler_with_callback<F>(
        &self,
        name: &str,
        data: impl Into<Value>,
        callback: F,
    ) -> CallbackId
    where
        F: FnOnce(Value) + 'static,
    {
        let callback_id = self.base.register_pending(Box::new(callback));
        self.base.send(name, data.into(), Some(callback_id.clone()));
        callback_id
    }

    /// Calls awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.base.state.borrow().pending.len()
    }

    // -- Inbound --

    /// Route one inbound message.
    pub fn receive(&self, message: Message) {
        self.base.receive(message);
    }

    /// Route a drained JavaScript queue (JSON array). Returns how many
    /// messages were routed.
    pub fn flush_message_queue(&self, raw: &str) -> Result<usize> {
        self.base.flush_message_queue(raw)
    }

    // -- Lifecycle --

    /// Drop every pending call without running it, unregister every handler
    /// and re-arm the startup queue.
    pub fn reset(&self) {
        self.base.reset();
    }

    /// Whether the counterpart has been injected since creation or the last
    /// reset.
    pub fn is_loaded(&self) -> bool {
        self.base.state.borrow().startup_queue.is_none()
    }

    pub fn js_version(&self) -> Option<String> {
        self.base.state.borrow().js_version.clone()
    }

    /// Version tag stamped onto the counterpart at the next injection.
    pub fn set_js_version(&self, version: Option<String>) {
        self.base.state.borrow_mut().js_version = version;
    }

    /// Run `observer` on every fatal error of this bridge. Observers survive
    /// [`Bridge::reset`].
    pub fn on_fatal_error<F>(&self, observer: F)
    where
        F: Fn(&FatalError) + 'static,
    {
        self.base
            .state
            .borrow_mut()
            .fatal_observers
            .push(Rc::new(observer));
    }

    /// Observe lifecycle events, including fatal errors, of this bridge.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.base.events.subscribe()
    }

    // -- Navigation --

    /// Forward navigations the bridge does not consume to `delegate`.
    pub fn set_webview_delegate(&self, delegate: Option<Arc<dyn NavigationDelegate>>) {
        self.base.navigation.set_delegate(delegate);
    }

    /// Router for web-view callbacks that must answer synchronously off the
    /// bridge. Intercepted commands must be passed back through
    /// [`Bridge::handle_bridge_url`].
    pub fn navigation(&self) -> &NavigationForwarder {
        &self.base.navigation
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.base.state.borrow();
        f.debug_struct("Bridge")
            .field("id", &self.base.id)
            .field("handlers", &state.registry)
            .field("pending", &state.pending.len())
            .field("loaded", &state.startup_queue.is_none())
            .finish()
    }
}

impl BridgeBase {
    /// Whether SEND/RCVD lines should be logged.
    pub(crate) fn logging_enabled(&self) -> bool {
        self.config.logging.enabled || crate::logging::logging_enabled()
    }

    pub(crate) fn transport(&self) -> Result<Rc<dyn Transport>> {
        self.transport
            .upgrade()
            .ok_or(wvjb_common::BridgeError::TransportDropped)
    }
}
