use std::rc::Weak;

use serde_json::Value;
use tracing::debug;
use wvjb_common::CallbackId;

use crate::message::Message;

use super::BridgeBase;

/// One-shot reply channel handed to a native handler.
///
/// Consuming it with [`Responder::respond`] sends the result back to the
/// JavaScript caller. A handler may keep it and answer later, as long as it
/// does so on the bridge's thread. If the call carried no callback id the
/// response is discarded.
pub struct Responder {
    target: Option<(CallbackId, Weak<BridgeBase>)>,
}

impl Responder {
    pub(crate) fn new(callback_id: Option<CallbackId>, base: Weak<BridgeBase>) -> Self {
        Self {
            target: callback_id.map(|id| (id, base)),
        }
    }

    /// A responder that discards its result.
    pub fn detached() -> Self {
        Self { target: None }
    }

    /// Whether the caller is waiting for a response.
    pub fn expects_response(&self) -> bool {
        self.target.is_some()
    }

    pub fn callback_id(&self) -> Option<&CallbackId> {
        self.target.as_ref().map(|(id, _)| id)
    }

    pub fn respond(self, data: impl Into<Value>) {
        let Some((callback_id, base)) = self.target else {
            return;
        };
        match base.upgrade() {
            Some(base) => base.queue_message(Message::response(callback_id, data.into())),
            None => debug!(callback_id = %callback_id, "bridge dropped before response"),
        }
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("callback_id", &self.callback_id())
            .finish()
    }
}
