//! Two-way message bridge between native Rust code and JavaScript running
//! inside an embedded web view.
//!
//! Provides:
//! - A handler registry for named native handlers
//! - Call/response correlation for calls into JavaScript
//! - A startup queue that holds outbound messages until the JavaScript
//!   counterpart is injected
//! - Navigation interception for the bootstrap URLs, with forwarding of
//!   everything else to a caller-supplied delegate
//!
//! The web view itself is abstracted behind [`Transport`].

pub mod bridge;
pub mod logging;
pub mod message;
pub mod navigation;
pub mod registry;
pub mod script;
pub mod transport;

pub use bridge::{Bridge, Responder};
pub use logging::enable_logging;
pub use message::{Message, MessageKind};
pub use navigation::{
    BridgeUrl, NavigationDecision, NavigationDelegate, NavigationForwarder, NavigationOutcome,
};
pub use registry::{Handler, HandlerRegistry};
pub use transport::Transport;

pub use wvjb_common::{BridgeError, BridgeEvent, BridgeId, CallbackId, FatalError, Result};
pub use wvjb_config::BridgeConfig;

/// Payload carried by calls and responses. The bridge never inspects it.
pub type Payload = serde_json::Value;
