//! Message envelope shared with the JavaScript counterpart.
//!
//! On the wire a message is a JSON object with camelCase keys:
//!
//! ```json
//! {"handlerName": "echo", "data": "hello", "callbackId": "rs_cb_1"}
//! {"responseId": "rs_cb_1", "responseData": "hello"}
//! ```
//!
//! JavaScript drains its outbound queue as a JSON array of these objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use wvjb_common::{BridgeError, CallbackId};

/// A call or a response crossing the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Target handler. Present on calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_name: Option<String>,
    /// Call payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    /// Set when the caller expects a response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<CallbackId>,
    /// Set when this message answers an earlier call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<CallbackId>,
    /// Response payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub response_data: Value,
}

/// Dispatch role of an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    Call {
        handler_name: String,
        data: Value,
        callback_id: Option<CallbackId>,
    },
    Response {
        response_id: CallbackId,
        data: Value,
    },
    /// Neither a `responseId` nor a `handlerName`.
    Invalid,
}

impl Message {
    /// Build an outbound call.
    pub fn call(
        handler_name: impl Into<String>,
        data: Value,
        callback_id: Option<CallbackId>,
    ) -> Self {
        Self {
            handler_name: Some(handler_name.into()),
            data,
            callback_id,
            ..Default::default()
        }
    }

    /// Build a response to a call that carried `response_id` as its callback id.
    pub fn response(response_id: CallbackId, data: Value) -> Self {
        Self {
            response_id: Some(response_id),
            response_data: data,
            ..Default::default()
        }
    }

    /// Classify the message for dispatch.
    ///
    /// `responseId` wins over `handlerName`: the JavaScript counterpart
    /// echoes the handler name on its responses.
    pub fn classify(self) -> MessageKind {
        if let Some(response_id) = self.response_id {
            return MessageKind::Response {
                response_id,
                data: self.response_data,
            };
        }
        match self.handler_name {
            Some(handler_name) => MessageKind::Call {
                handler_name,
                data: self.data,
                callback_id: self.callback_id,
            },
            None => MessageKind::Invalid,
        }
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse a drained JavaScript queue (a JSON array of messages).
///
/// Entries that are not objects, or objects with mistyped fields, are
/// skipped with a warning; only a malformed array fails the whole batch.
pub fn parse_queue(raw: &str) -> Result<Vec<Message>, BridgeError> {
    let entries: Vec<Value> = serde_json::from_str(raw)
        .map_err(|e| BridgeError::InvalidMessageQueue(format!("expected a JSON array: {e}")))?;

    let mut messages = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            warn!(entry = %entry, "invalid message received, skipping");
            continue;
        }
        match serde_json::from_value::<Message>(entry) {
            Ok(message) => messages.push(message),
            Err(e) => warn!(error = %e, "malformed message received, skipping"),
        }
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_serializes_camel_case() {
        let msg = Message::call("echo", json!("hello"), Some(CallbackId::from("rs_cb_1")));
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"handlerName": "echo", "data": "hello", "callbackId": "rs_cb_1"})
        );
    }

    #[test]
    fn fire_and_forget_call_omits_callback_and_null_data() {
        let msg = Message::call("ping", Value::Null, None);
        assert_eq!(msg.to_json().unwrap(), r#"{"handlerName":"ping"}"#);
    }

    #[test]
    fn response_uses_response_data() {
        let msg = Message::response(CallbackId::from("cb_1_99"), json!({"ok": true}));
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"responseId": "cb_1_99", "responseData": {"ok": true}}));
    }

    #[test]
    fn classify_call() {
        let msg: Message =
            serde_json::from_str(r#"{"handlerName":"save","data":[1,2],"callbackId":"cb_1"}"#)
                .unwrap();
        assert_eq!(
            msg.classify(),
            MessageKind::Call {
                handler_name: "save".into(),
                data: json!([1, 2]),
                callback_id: Some(CallbackId::from("cb_1")),
            }
        );
    }

    #[test]
    fn classify_response_wins_over_handler_name() {
        let msg: Message = serde_json::from_str(
            r#"{"handlerName":"echo","responseId":"rs_cb_4","responseData":"hi"}"#,
        )
        .unwrap();
        assert_eq!(
            msg.classify(),
            MessageKind::Response {
                response_id: CallbackId::from("rs_cb_4"),
                data: json!("hi"),
            }
        );
    }

    #[test]
    fn classify_invalid() {
        let msg: Message = serde_json::from_str(r#"{"data":1}"#).unwrap();
        assert_eq!(msg.classify(), MessageKind::Invalid);
    }

    #[test]
    fn explicit_nulls_are_treated_as_absent() {
        let msg: Message = serde_json::from_str(
            r#"{"handlerName":"a","data":null,"callbackId":null,"responseId":null}"#,
        )
        .unwrap();
        assert_eq!(
            msg.classify(),
            MessageKind::Call {
                handler_name: "a".into(),
                data: Value::Null,
                callback_id: None,
            }
        );
    }

    #[test]
    fn parse_queue_reads_array() {
        let raw = r#"[{"handlerName":"a"},{"responseId":"rs_cb_1","responseData":2}]"#;
        let messages = parse_queue(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].handler_name.as_deref(), Some("a"));
        assert_eq!(messages[1].response_data, json!(2));
    }

    #[test]
    fn parse_queue_skips_non_objects() {
        let raw = r#"[1, "two", null, {"handlerName":"ok"}, {"handlerName": 5}]"#;
        let messages = parse_queue(raw).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].handler_name.as_deref(), Some("ok"));
    }

    #[test]
    fn parse_queue_rejects_non_array() {
        assert!(matches!(
            parse_queue(r#"{"handlerName":"a"}"#),
            Err(BridgeError::InvalidMessageQueue(_))
        ));
        assert!(matches!(
            parse_queue("not json"),
            Err(BridgeError::InvalidMessageQueue(_))
        ));
    }
}
