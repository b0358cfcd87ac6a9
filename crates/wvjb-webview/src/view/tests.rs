//! Routing of recorded web-view events into a bridge.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wvjb_common::BridgeError;
use wvjb_config::BridgeConfig;
use wvjb_core::{script, Bridge, BridgeUrl, NavigationDelegate, Transport};

use super::route_events;
use crate::events::{PageLoadState, WebViewEvent};

#[derive(Default)]
struct RecordingTransport {
    scripts: RefCell<Vec<String>>,
}

impl Transport for RecordingTransport {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError> {
        self.scripts.borrow_mut().push(script.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDelegate {
    seen: Mutex<Vec<String>>,
}

impl NavigationDelegate for RecordingDelegate {
    fn did_start_navigation(&self, url: &str) {
        self.seen.lock().unwrap().push(format!("start {url}"));
    }

    fn did_finish_navigation(&self, url: &str) {
        self.seen.lock().unwrap().push(format!("finish {url}"));
    }
}

fn new_bridge() -> (Rc<RecordingTransport>, Bridge) {
    let transport = Rc::new(RecordingTransport::default());
    let bridge = Bridge::for_transport(&transport, BridgeConfig::default());
    (transport, bridge)
}

fn loaded_bridge() -> (Rc<RecordingTransport>, Bridge) {
    let (transport, bridge) = new_bridge();
    bridge.inject_javascript().unwrap();
    transport.scripts.borrow_mut().clear();
    (transport, bridge)
}

fn queue_ipc(payload: &str) -> WebViewEvent {
    WebViewEvent::IpcMessage {
        body: json!({ "kind": "wvjb_queue", "payload": payload }).to_string(),
    }
}

fn page_load(state: PageLoadState, url: &str) -> WebViewEvent {
    WebViewEvent::PageLoad {
        state,
        url: url.into(),
    }
}

// -- IPC --

#[test]
fn queue_ipc_reaches_handlers_and_is_consumed() {
    let (transport, bridge) = loaded_bridge();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bridge.register_handler("echo", move |data, responder| {
        sink.borrow_mut().push(data.clone());
        responder.respond(data);
    });

    let rest = route_events(
        &bridge,
        vec![queue_ipc(
            r#"[{"handlerName":"echo","data":"hi","callbackId":"cb_1_0"}]"#,
        )],
    );

    assert!(rest.is_empty());
    assert_eq!(*seen.borrow(), vec![json!("hi")]);
    let scripts = transport.scripts.borrow();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].starts_with("WebViewJavascriptBridge._handleMessageFromNative("));
    assert!(scripts[0].contains("cb_1_0"));
}

#[test]
fn other_ipc_kinds_are_returned() {
    let (transport, bridge) = loaded_bridge();
    let event = WebViewEvent::IpcMessage {
        body: r#"{"kind":"app_ping","payload":{"n":1}}"#.into(),
    };

    let rest = route_events(&bridge, vec![event.clone()]);

    assert_eq!(rest, vec![event]);
    assert!(transport.scripts.borrow().is_empty());
}

#[test]
fn malformed_queue_is_dropped_not_returned() {
    let (transport, bridge) = loaded_bridge();
    let called = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&called);
    bridge.register_handler("echo", move |_, _| *flag.borrow_mut() = true);

    let rest = route_events(&bridge, vec![queue_ipc("not json"), queue_ipc("")]);

    assert!(rest.is_empty());
    assert!(!*called.borrow());
    assert!(transport.scripts.borrow().is_empty());
}

// -- Page loads --

#[test]
fn finished_page_load_injects_and_drains_startup_queue() {
    let (transport, bridge) = new_bridge();
    bridge.call_handler_with_data("greet", "early");

    let event = page_load(PageLoadState::Finished, "https://example.com/");
    let rest = route_events(&bridge, vec![event.clone()]);

    assert_eq!(rest, vec![event]);
    assert!(bridge.is_loaded());
    let scripts = transport.scripts.borrow();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0], script::bridge_script(None));
    assert!(scripts[1].contains("greet"));
    assert!(scripts[1].contains("early"));
}

#[test]
fn page_loads_reach_the_delegate_in_order() {
    let (_transport, bridge) = loaded_bridge();
    let delegate = Arc::new(RecordingDelegate::default());
    bridge.set_webview_delegate(Some(delegate.clone()));

    let events = vec![
        page_load(PageLoadState::Started, "https://example.com/"),
        WebViewEvent::NavigationRequested {
            url: "https://example.com/next".into(),
        },
        page_load(PageLoadState::Finished, "https://example.com/"),
    ];
    let rest = route_events(&bridge, events.clone());

    assert_eq!(rest, events);
    assert_eq!(
        *delegate.seen.lock().unwrap(),
        vec![
            "start https://example.com/".to_string(),
            "finish https://example.com/".to_string(),
        ]
    );
}

// -- Bridge commands --

#[test]
fn bridge_loaded_command_injects_and_is_consumed() {
    let (transport, bridge) = new_bridge();

    let rest = route_events(&bridge, vec![WebViewEvent::BridgeCommand(BridgeUrl::BridgeLoaded)]);

    assert!(rest.is_empty());
    assert!(bridge.is_loaded());
    assert_eq!(transport.scripts.borrow().len(), 1);
}

#[test]
fn queue_command_asks_page_to_flush() {
    let (transport, bridge) = loaded_bridge();

    let rest = route_events(
        &bridge,
        vec![
            WebViewEvent::BridgeCommand(BridgeUrl::QueueHasMessage),
            WebViewEvent::BridgeCommand(BridgeUrl::Unknown),
        ],
    );

    assert!(rest.is_empty());
    assert_eq!(
        *transport.scripts.borrow(),
        vec![script::FETCH_QUEUE_COMMAND.to_string()]
    );
}

#[test]
fn queue_ipc_response_resolves_native_callback() {
    let (_transport, bridge) = loaded_bridge();
    let got = Rc::new(RefCell::new(None::<Value>));
    let sink = Rc::clone(&got);
    let id = bridge.call_handler_with_callback("ask", Value::Null, move |v| {
        *sink.borrow_mut() = Some(v);
    });

    let queue = json!([{ "handlerName": "ask", "responseId": id.as_str(), "responseData": 42 }]);
    route_events(&bridge, vec![queue_ipc(&queue.to_string())]);

    assert_eq!(*got.borrow(), Some(json!(42)));
    assert_eq!(bridge.pending_count(), 0);
}
