use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::errors::FatalError;

/// Lifecycle and diagnostic events published by a single bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BridgeEvent {
    /// The JavaScript counterpart was injected and the startup queue drained.
    Loaded { flushed: usize },
    /// `reset()` discarded pending calls and handlers.
    Reset { discarded: usize },
    /// An inbound call named a handler that is not registered.
    HandlerNotFound { handler_name: String },
    /// The protocol handshake failed; terminal for this bridge.
    FatalError(FatalError),
}

/// Per-bridge observer channel.
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BridgeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
