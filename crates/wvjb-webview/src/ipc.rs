//! IPC envelope between the JavaScript counterpart and Rust.
//!
//! The counterpart posts `{"kind": "wvjb_queue", "payload": "<json array>"}`
//! through `window.ipc.postMessage`, which `wry` routes to the IPC handler
//! registered on the web view. Other kinds belong to the embedding app.

use serde::{Deserialize, Serialize};
use wvjb_core::script::QUEUE_IPC_KIND;

/// A typed IPC message from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The drained bridge queue, as the JSON array text the bridge consumes.
    ///
    /// Accepts the payload either as a string (what the counterpart sends)
    /// or as an inline array.
    pub fn bridge_queue(&self) -> Option<String> {
        if self.kind != QUEUE_IPC_KIND {
            return None;
        }
        match &self.payload {
            serde_json::Value::String(raw) => Some(raw.clone()),
            value @ serde_json::Value::Array(_) => Some(value.to_string()),
            _ => None,
        }
    }
}
