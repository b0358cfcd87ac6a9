//! Bootstrap handshake and navigation hooks.

use serde_json::Value;
use tracing::{debug, error, warn};
use wvjb_common::{BridgeEvent, FatalError, Result};

use crate::navigation::{BridgeUrl, NavigationDecision, NavigationOutcome};
use crate::script;

use super::{Bridge, BridgeBase};

impl Bridge {
    /// Evaluate the JavaScript counterpart in the page, then deliver the
    /// startup queue in order.
    ///
    /// Safe to repeat: the counterpart ignores a second injection. A failed
    /// evaluation is fatal for the handshake and is not retried.
    pub fn inject_javascript(&self) -> Result<()> {
        let script = script::bridge_script(self.js_version().as_deref());
        let evaluated = self
            .base
            .transport()
            .and_then(|t| t.evaluate_script(&script));
        if let Err(e) = evaluated {
            self.base.fatal(FatalError::InjectionFailed(e.to_string()));
            return Err(e);
        }

        let queued = self
            .base
            .state
            .borrow_mut()
            .startup_queue
            .take()
            .unwrap_or_default();
        let flushed = queued.len();
        for message in &queued {
            self.base.dispatch_message(message);
        }

        if !self.base.config.bootstrap.alert_box_safety_timeout {
            self.disable_javascript_alert_box_safety_timeout();
        }

        debug!(bridge = %self.base.id, flushed, "JS counterpart injected");
        self.base.events.publish(BridgeEvent::Loaded { flushed });
        Ok(())
    }

    /// Act on an intercepted bootstrap URL.
    pub fn handle_bridge_url(&self, kind: BridgeUrl) {
        match kind {
            BridgeUrl::BridgeLoaded => {
                if let Err(e) = self.inject_javascript() {
                    debug!(bridge = %self.base.id, error = %e, "bridge-loaded injection failed");
                }
            }
            BridgeUrl::QueueHasMessage => self.fetch_queue(),
            BridgeUrl::Unknown => {
                warn!(bridge = %self.base.id, "received unknown bridge command");
            }
        }
    }

    /// Ask the counterpart to post its pending messages over IPC.
    pub fn fetch_queue(&self) {
        let fetched = self
            .base
            .transport()
            .and_then(|t| t.evaluate_script(script::FETCH_QUEUE_COMMAND));
        if let Err(e) = fetched {
            self.base.fatal(FatalError::QueueFetchFailed(e.to_string()));
        }
    }

    /// Decide a navigation on the bridge's own thread: bootstrap URLs are
    /// handled and cancelled, everything else is forwarded.
    pub fn decide_policy_for_navigation(&self, url: &str) -> NavigationDecision {
        let outcome = self.base.navigation.decide(url);
        if let NavigationOutcome::Intercepted(kind) = outcome {
            self.handle_bridge_url(kind);
        }
        outcome.decision()
    }

    pub fn did_start_navigation(&self, url: &str) {
        self.base.navigation.did_start_navigation(url);
    }

    /// Forward a finished page load, injecting the counterpart first when it
    /// is installed at document start.
    pub fn did_finish_navigation(&self, url: &str) {
        if self.base.config.bootstrap.inject_at_document_start {
            if let Err(e) = self.inject_javascript() {
                debug!(bridge = %self.base.id, url = %url, error = %e, "page-load injection failed");
            }
        }
        self.base.navigation.did_finish_navigation(url);
    }

    /// The web content process died; the page and its counterpart are gone.
    pub fn content_process_did_terminate(&self) {
        self.base.navigation.content_process_did_terminate();
        self.base.fatal(FatalError::ContentProcessTerminated);
    }

    /// Make the JS side dispatch native messages synchronously instead of
    /// through `setTimeout`. Only safe if no JS handler calls `alert()`.
    pub fn disable_javascript_alert_box_safety_timeout(&self) {
        self.base
            .send(script::DISABLE_ALERT_TIMEOUT_HANDLER, Value::Null, None);
    }
}

impl BridgeBase {
    pub(crate) fn fatal(&self, error: FatalError) {
        error!(bridge = %self.id, %error, "fatal bridge error");
        let observers = self.state.borrow().fatal_observers.clone();
        for observer in &observers {
            observer(&error);
        }
        self.events.publish(BridgeEvent::FatalError(error));
    }
}
