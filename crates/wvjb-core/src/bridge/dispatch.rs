//! Outbound queuing/delivery and inbound routing.

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};
use wvjb_common::{BridgeEvent, CallbackId, Result};

use crate::logging::truncate_for_log;
use crate::message::{self, Message, MessageKind};

use super::{BridgeBase, ResponseCallback, Responder};

impl BridgeBase {
    /// Mint a correlation id and park `callback` under it.
    pub(crate) fn register_pending(&self, callback: ResponseCallback) -> CallbackId {
        let mut state = self.state.borrow_mut();
        let callback_id = state.ids.next_id();
        let previous = state.pending.insert(callback_id.clone(), callback);
        debug_assert!(previous.is_none(), "correlation id {callback_id} reissued");
        callback_id
    }

    pub(crate) fn send(&self, handler_name: &str, data: Value, callback_id: Option<CallbackId>) {
        self.queue_message(Message::call(handler_name, data, callback_id));
    }

    /// Hold `message` in the startup queue, or deliver it if already loaded.
    pub(crate) fn queue_message(&self, message: Message) {
        {
            let mut state = self.state.borrow_mut();
            if let Some(queue) = state.startup_queue.as_mut() {
                queue.push(message);
                return;
            }
        }
        self.dispatch_message(&message);
    }

    /// Serialize and hand one message to the transport. Failures are logged
    /// and the message is dropped.
    pub(crate) fn dispatch_message(&self, message: &Message) {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(bridge = %self.id, error = %e, "failed to serialize message");
                return;
            }
        };
        self.log("SEND", &json);

        if let Err(e) = self.transport().and_then(|t| t.deliver(&json)) {
            warn!(bridge = %self.id, error = %e, "failed to deliver message");
        }
    }

    /// Route one inbound message.
    pub(crate) fn receive(self: &Rc<Self>, message: Message) {
        if self.logging_enabled() {
            if let Ok(json) = message.to_json() {
                self.log("RCVD", &json);
            }
        }

        match message.classify() {
            MessageKind::Response { response_id, data } => {
                let callback = self.state.borrow_mut().pending.remove(&response_id);
                match callback {
                    Some(callback) => callback(data),
                    None => {
                        debug!(bridge = %self.id, response_id = %response_id, "stale response dropped");
                    }
                }
            }
            MessageKind::Call {
                handler_name,
                data,
                callback_id,
            } => {
                let handler = self.state.borrow().registry.lookup(&handler_name);
                match handler {
                    Some(handler) => {
                        let responder = Responder::new(callback_id, Rc::downgrade(self));
                        handler(data, responder);
                    }
                    None => {
                        warn!(bridge = %self.id, handler = %handler_name, "no handler for message from JS");
                        self.events
                            .publish(BridgeEvent::HandlerNotFound { handler_name });
                    }
                }
            }
            MessageKind::Invalid => {
                warn!(bridge = %self.id, "message has neither handlerName nor responseId, dropped");
            }
        }
    }

    pub(crate) fn flush_message_queue(self: &Rc<Self>, raw: &str) -> Result<usize> {
        if raw.trim().is_empty() {
            warn!(
                bridge = %self.id,
                "got an empty message queue; the JS counterpart may not be present in the page"
            );
            return Ok(0);
        }

        let messages = message::parse_queue(raw)?;
        let count = messages.len();
        for message in messages {
            self.receive(message);
        }
        Ok(count)
    }

    pub(crate) fn reset(&self) {
        let (discarded, handlers) = {
            let mut state = self.state.borrow_mut();
            let discarded = std::mem::take(&mut state.pending);
            let handlers = state.registry.unregister_all();
            state.startup_queue = Some(Vec::new());
            (discarded, handlers)
        };
        let count = discarded.len();
        drop(discarded);

        debug!(bridge = %self.id, discarded = count, handlers, "bridge reset");
        self.events.publish(BridgeEvent::Reset { discarded: count });
    }

    fn log(&self, action: &str, json: &str) {
        if !self.logging_enabled() {
            return;
        }
        let max = self.config.logging.max_length as usize;
        info!(bridge = %self.id, "{action}: {}", truncate_for_log(json, max));
    }
}
