//! Message logging toggle and truncation.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn on message logging for every bridge in the process.
///
/// There is no way to switch it off again. Prefer `logging.enabled` in
/// [`crate::BridgeConfig`] when only one bridge should log.
pub fn enable_logging() {
    LOGGING_ENABLED.store(true, Ordering::Relaxed);
}

/// Whether [`enable_logging`] has been called.
pub fn logging_enabled() -> bool {
    LOGGING_ENABLED.load(Ordering::Relaxed)
}

/// Cut `text` to at most `max_chars` characters, marking the cut with ` [...]`.
pub fn truncate_for_log(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{} [...]", &text[..byte_idx])),
        None => Cow::Borrowed(text),
    }
}
