//! Navigation interception and delegate forwarding.
//!
//! Bootstrap URLs (`https://__bridge_loaded__`, `https://__wvjb_queue_message__`)
//! are consumed by the bridge and cancelled. Every other navigation goes to
//! the caller's [`NavigationDelegate`], or to the configured allowlist when
//! no delegate is set.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wvjb_config::{BridgeConfig, NavigationConfig};

/// Host of the URL the page loads to request injection.
pub const BRIDGE_LOADED_HOST: &str = "__bridge_loaded__";
/// Host of the URL signalling that the JS queue has messages.
pub const QUEUE_HAS_MESSAGE_HOST: &str = "__wvjb_queue_message__";

/// A bootstrap command carried by a navigation URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeUrl {
    BridgeLoaded,
    QueueHasMessage,
    /// Bridge-shaped (`__name__` host) but not a known command.
    Unknown,
}

/// Whether a navigation may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Cancel,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Result of routing one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A bootstrap URL; the navigation must be cancelled and the command
    /// handed to the bridge.
    Intercepted(BridgeUrl),
    /// Any other URL, decided by the delegate or allowlist.
    Forwarded(NavigationDecision),
}

impl NavigationOutcome {
    /// Collapse to the decision reported back to the web view.
    pub fn decision(self) -> NavigationDecision {
        match self {
            Self::Intercepted(_) => NavigationDecision::Cancel,
            Self::Forwarded(decision) => decision,
        }
    }
}

/// Secondary receiver of navigation events the bridge does not consume.
pub trait NavigationDelegate: Send + Sync {
    fn decide_policy(&self, _url: &str) -> NavigationDecision {
        NavigationDecision::Allow
    }

    fn did_start_navigation(&self, _url: &str) {}

    fn did_finish_navigation(&self, _url: &str) {}

    fn content_process_did_terminate(&self) {}
}

/// Classify `url` as a bootstrap URL under `scheme`, if it is one.
pub fn classify_url(url: &str, scheme: &str) -> Option<BridgeUrl> {
    let (url_scheme, rest) = url.split_once("://")?;
    if !url_scheme.eq_ignore_ascii_case(scheme) {
        return None;
    }

    let host_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#' | ':'))
        .unwrap_or(rest.len());
    let host = rest[..host_end].to_ascii_lowercase();

    if host == BRIDGE_LOADED_HOST {
        Some(BridgeUrl::BridgeLoaded)
    } else if host == QUEUE_HAS_MESSAGE_HOST {
        Some(BridgeUrl::QueueHasMessage)
    } else if host.len() > 4 && host.starts_with("__") && host.ends_with("__") {
        Some(BridgeUrl::Unknown)
    } else {
        None
    }
}

/// Shared, thread-safe navigation router.
///
/// Cheap to clone; web-view callbacks that must answer synchronously hold a
/// clone while the bridge itself stays on the owning thread.
#[derive(Clone)]
pub struct NavigationForwarder {
    schemes: Arc<[String]>,
    policy: Arc<NavigationConfig>,
    delegate: Arc<Mutex<Option<Arc<dyn NavigationDelegate>>>>,
}

impl NavigationForwarder {
    /// Router intercepting bootstrap URLs under any of `schemes`.
    pub fn new<S: AsRef<str>>(schemes: &[S], policy: NavigationConfig) -> Self {
        Self {
            schemes: schemes.iter().map(|s| s.as_ref().to_string()).collect(),
            policy: Arc::new(policy),
            delegate: Arc::new(Mutex::new(None)),
        }
    }

    /// Router for the bootstrap schemes and allowlist of `config`.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(
            config.bootstrap.schemes.as_slice(),
            config.navigation.clone(),
        )
    }

    /// Replace the secondary delegate. `None` falls back to the allowlist.
    pub fn set_delegate(&self, delegate: Option<Arc<dyn NavigationDelegate>>) {
        if let Ok(mut slot) = self.delegate.lock() {
            *slot = delegate;
        }
    }

    pub fn delegate(&self) -> Option<Arc<dyn NavigationDelegate>> {
        self.delegate.lock().ok().and_then(|slot| slot.clone())
    }

    /// Route a navigation request.
    pub fn decide(&self, url: &str) -> NavigationOutcome {
        let intercepted = self
            .schemes
            .iter()
            .find_map(|scheme| classify_url(url, scheme));
        if let Some(kind) = intercepted {
            debug!(url = %url, ?kind, "bridge URL intercepted");
            return NavigationOutcome::Intercepted(kind);
        }

        let decision = match self.delegate() {
            Some(delegate) => delegate.decide_policy(url),
            None if self.policy.is_allowed(url) => NavigationDecision::Allow,
            None => {
                warn!(url = %url, "navigation blocked: URL not in allowlist");
                NavigationDecision::Cancel
            }
        };
        NavigationOutcome::Forwarded(decision)
    }

    pub fn did_start_navigation(&self, url: &str) {
        if let Some(delegate) = self.delegate() {
            delegate.did_start_navigation(url);
        }
    }

    pub fn did_finish_navigation(&self, url: &str) {
        if let Some(delegate) = self.delegate() {
            delegate.did_finish_navigation(url);
        }
    }

    pub fn content_process_did_terminate(&self) {
        if let Some(delegate) = self.delegate() {
            delegate.content_process_did_terminate();
        }
    }
}

impl std::fmt::Debug for NavigationForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationForwarder")
            .field("schemes", &self.schemes)
            .field("policy", &self.policy)
            .field("has_delegate", &self.delegate().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Bootstrap URLs --

    #[test]
    fn classifies_bridge_loaded() {
        assert_eq!(
            classify_url("https://__bridge_loaded__", "https"),
            Some(BridgeUrl::BridgeLoaded)
        );
        assert_eq!(
            classify_url("https://__bridge_loaded__/", "https"),
            Some(BridgeUrl::BridgeLoaded)
        );
    }

    #[test]
    fn classifies_queue_message() {
        assert_eq!(
            classify_url("https://__wvjb_queue_message__", "https"),
            Some(BridgeUrl::QueueHasMessage)
        );
        assert_eq!(
            classify_url("HTTPS://__WVJB_QUEUE_MESSAGE__?x=1", "https"),
            Some(BridgeUrl::QueueHasMessage)
        );
    }

    #[test]
    fn classifies_unknown_command() {
        assert_eq!(
            classify_url("https://__something_else__", "https"),
            Some(BridgeUrl::Unknown)
        );
    }

    #[test]
    fn respects_configured_scheme() {
        assert_eq!(classify_url("https://__bridge_loaded__", "wvjbscheme"), None);
        assert_eq!(
            classify_url("wvjbscheme://__bridge_loaded__", "wvjbscheme"),
            Some(BridgeUrl::BridgeLoaded)
        );
    }

    #[test]
    fn ordinary_urls_are_not_bridge_urls() {
        assert_eq!(classify_url("https://example.com/__bridge_loaded__", "https"), None);
        assert_eq!(classify_url("https://____", "https"), None);
        assert_eq!(classify_url("about:blank", "https"), None);
        assert_eq!(classify_url("", "https"), None);
    }

    // -- Forwarding --

    struct DenyAll;

    impl NavigationDelegate for DenyAll {
        fn decide_policy(&self, _url: &str) -> NavigationDecision {
            NavigationDecision::Cancel
        }
    }

    #[test]
    fn intercepts_before_consulting_delegate() {
        let forwarder = NavigationForwarder::new(&["https"], NavigationConfig::default());
        forwarder.set_delegate(Some(Arc::new(DenyAll)));
        let outcome = forwarder.decide("https://__bridge_loaded__");
        assert_eq!(outcome, NavigationOutcome::Intercepted(BridgeUrl::BridgeLoaded));
        assert_eq!(outcome.decision(), NavigationDecision::Cancel);
    }

    #[test]
    fn delegate_decides_other_urls() {
        let forwarder = NavigationForwarder::new(&["https"], NavigationConfig::default());
        forwarder.set_delegate(Some(Arc::new(DenyAll)));
        assert_eq!(
            forwarder.decide("https://example.com"),
            NavigationOutcome::Forwarded(NavigationDecision::Cancel)
        );
    }

    #[test]
    fn allowlist_applies_without_delegate() {
        let forwarder = NavigationForwarder::new(
            &["https"],
            NavigationConfig {
                allowed_prefixes: vec!["app://".into(), "about:blank".into()],
            },
        );
        assert_eq!(forwarder.decide("app://localhost/index.html").decision(), NavigationDecision::Allow);
        assert_eq!(forwarder.decide("about:blank").decision(), NavigationDecision::Allow);
        assert_eq!(forwarder.decide("https://evil.com").decision(), NavigationDecision::Cancel);
        assert_eq!(forwarder.decide("file:///etc/passwd").decision(), NavigationDecision::Cancel);
        assert_eq!(forwarder.decide("javascript:alert(1)").decision(), NavigationDecision::Cancel);
    }

    #[test]
    fn clearing_delegate_restores_allowlist() {
        let forwarder = NavigationForwarder::new(&["https"], NavigationConfig::default());
        forwarder.set_delegate(Some(Arc::new(DenyAll)));
        forwarder.set_delegate(None);
        assert!(forwarder.delegate().is_none());
        assert_eq!(forwarder.decide("https://example.com").decision(), NavigationDecision::Allow);
    }

    #[test]
    fn default_config_intercepts_legacy_scheme() {
        let forwarder = NavigationForwarder::from_config(&BridgeConfig::default());
        for url in ["https://__bridge_loaded__", "wvjbscheme://__bridge_loaded__"] {
            assert_eq!(
                forwarder.decide(url),
                NavigationOutcome::Intercepted(BridgeUrl::BridgeLoaded),
                "{url}"
            );
        }
        assert_eq!(
            forwarder.decide("wvjbscheme://__wvjb_queue_message__/"),
            NavigationOutcome::Intercepted(BridgeUrl::QueueHasMessage)
        );
    }

    #[test]
    fn from_config_uses_bootstrap_schemes() {
        let mut config = BridgeConfig::default();
        config.bootstrap.schemes = vec!["wvjbscheme".into()];
        let forwarder = NavigationForwarder::from_config(&config);
        assert_eq!(
            forwarder.decide("wvjbscheme://__bridge_loaded__"),
            NavigationOutcome::Intercepted(BridgeUrl::BridgeLoaded)
        );
        assert_eq!(
            forwarder.decide("https://__bridge_loaded__"),
            NavigationOutcome::Forwarded(NavigationDecision::Allow)
        );
    }

    #[test]
    fn clones_share_the_delegate_slot() {
        let forwarder = NavigationForwarder::new(&["https"], NavigationConfig::default());
        let clone = forwarder.clone();
        forwarder.set_delegate(Some(Arc::new(DenyAll)));
        assert!(clone.delegate().is_some());
        assert!(format!("{clone:?}").contains("has_delegate: true"));
    }
}
