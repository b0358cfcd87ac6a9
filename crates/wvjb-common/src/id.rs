use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of correlation ids issued on the native side.
pub const NATIVE_CALLBACK_PREFIX: &str = "rs_cb_";

/// Identifies one bridge instance in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BridgeId(String);

impl BridgeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BridgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BridgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier pairing a call with its eventual response.
///
/// Ids minted by the JavaScript side have their own shape, so this is kept
/// as a plain string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CallbackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CallbackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of native correlation ids.
///
/// The counter only moves forward, so an id is never reissued for the
/// lifetime of the generator.
#[derive(Debug)]
pub struct CallbackIdGenerator {
    next: u64,
}

impl CallbackIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> CallbackId {
        let id = CallbackId(format!("{NATIVE_CALLBACK_PREFIX}{}", self.next));
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for CallbackIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_id_is_valid_uuid() {
        let id = BridgeId::new();
        let parsed = uuid::Uuid::parse_str(id.as_str());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn bridge_id_is_unique() {
        assert_ne!(BridgeId::new(), BridgeId::new());
    }

    #[test]
    fn bridge_id_display() {
        let id = BridgeId::default();
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn generator_starts_at_one() {
        let mut gen = CallbackIdGenerator::new();
        assert_eq!(gen.issued(), 0);
        assert_eq!(gen.next_id().as_str(), "rs_cb_1");
        assert_eq!(gen.issued(), 1);
    }

    #[test]
    fn consecutive_ids_are_distinct() {
        let mut gen = CallbackIdGenerator::new();
        let a = gen.next_id();
        let b = gen.next_id();
        assert_ne!(a, b);
        assert_eq!(b.as_str(), "rs_cb_2");
    }

    #[test]
    fn callback_id_is_transparent_on_the_wire() {
        let id = CallbackId::from("cb_3_1700000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cb_3_1700000000\"");

        let back: CallbackId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
