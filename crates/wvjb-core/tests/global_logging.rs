//! `enable_logging` flips a process-wide flag with no way back, so it runs in
//! its own test binary where no other test depends on logging being off.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use wvjb_core::logging::logging_enabled;
use wvjb_core::{enable_logging, Bridge, BridgeConfig, BridgeError, Transport};

#[derive(Default)]
struct Sink(RefCell<Vec<String>>);

impl Transport for Sink {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError> {
        self.0.borrow_mut().push(script.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn captured_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn enable_logging_turns_on_message_logs_for_bridges_without_config() {
    let transport = Rc::new(Sink::default());
    let bridge = Bridge::for_transport(&transport, BridgeConfig::default());
    bridge.inject_javascript().unwrap();

    assert!(!logging_enabled());
    let quiet = captured_logs(|| bridge.call_handler("before"));
    assert!(!quiet.contains("SEND:"), "{quiet}");

    enable_logging();
    assert!(logging_enabled());

    let loud = captured_logs(|| bridge.call_handler("after"));
    assert!(loud.contains(r#"SEND: {"handlerName":"after"}"#), "{loud}");
}
