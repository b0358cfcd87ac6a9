//! Named native handlers.

use std::collections::HashMap;
use std::rc::Rc;

use crate::bridge::Responder;
use crate::Payload;

/// A native handler: receives the call payload and a one-shot responder.
pub type Handler = Rc<dyn Fn(Payload, Responder)>;

/// Maps handler names to handlers. Registering a name twice replaces the
/// earlier handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `name`. Returns `true` if a handler was replaced.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) -> bool {
        self.handlers.insert(name.into(), handler).is_some()
    }

    /// Look up a handler. The returned `Rc` keeps it alive across a
    /// re-entrant `reset` during its own invocation.
    pub fn lookup(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Remove every handler, returning how many were registered.
    pub fn unregister_all(&mut self) -> usize {
        let count = self.handlers.len();
        self.handlers.clear();
        count
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
