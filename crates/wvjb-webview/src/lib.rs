//! `wry` binding for the native/JavaScript bridge.
//!
//! Provides:
//! - A web view bundled with its bridge (one bridge per view)
//! - The bridge's transport: script evaluation on the `wry` web view
//! - IPC plumbing for the JavaScript counterpart's message queue
//! - Navigation interception for bootstrap URLs, forwarding the rest

pub mod events;
pub mod ipc;
pub mod view;

pub use events::{PageLoadState, WebViewEvent};
pub use ipc::IpcMessage;
pub use view::{BridgedWebView, WebViewConfig, WebViewHandle};
