//! The web view as seen by the bridge.
//!
//! Messages flow in both directions:
//! - **Native -> JS**: the bridge evaluates
//!   `WebViewJavascriptBridge._handleMessageFromNative("<message json>")`.
//! - **JS -> Native**: the counterpart posts its drained queue over the web
//!   view's IPC channel; the embedder hands it to
//!   [`crate::Bridge::flush_message_queue`].

use wvjb_common::BridgeError;

use crate::script;

/// Script-evaluation channel into the web content.
///
/// Implementors are held weakly by the bridge, so dropping the web view
/// simply makes further deliveries fail with [`BridgeError::TransportDropped`].
pub trait Transport {
    /// Evaluate JavaScript in the page. Fire-and-forget.
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError>;

    /// Deliver one serialized message to the JavaScript counterpart.
    fn deliver(&self, message_json: &str) -> Result<(), BridgeError> {
        self.evaluate_script(&script::dispatch_command(message_json))
    }
}
