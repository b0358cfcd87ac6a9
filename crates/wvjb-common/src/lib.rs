pub mod errors;
pub mod events;
pub mod id;

pub use errors::{BridgeError, ConfigError, FatalError};
pub use events::{BridgeEvent, EventBus};
pub use id::{BridgeId, CallbackId, CallbackIdGenerator};

pub type Result<T> = std::result::Result<T, BridgeError>;
