//! The JavaScript counterpart and the commands the bridge evaluates.
//!
//! Pages pick up the counterpart with the usual setup shim:
//!
//! ```js
//! function setupWebViewJavascriptBridge(callback) {
//!     if (window.WebViewJavascriptBridge) { return callback(WebViewJavascriptBridge); }
//!     if (window.WVJBCallbacks) { return window.WVJBCallbacks.push(callback); }
//!     window.WVJBCallbacks = [callback];
//!     var iframe = document.createElement('iframe');
//!     iframe.style.display = 'none';
//!     iframe.src = 'https://__bridge_loaded__';
//!     document.documentElement.appendChild(iframe);
//!     setTimeout(function() { document.documentElement.removeChild(iframe) }, 0);
//! }
//! ```

/// Name of the JS-side handler that turns off the `setTimeout` dispatch wrapper.
pub const DISABLE_ALERT_TIMEOUT_HANDLER: &str = "_disableJavascriptAlertBoxSafetyTimeout";

/// IPC `kind` used by the counterpart when posting its queue.
pub const QUEUE_IPC_KIND: &str = "wvjb_queue";

/// Asks the counterpart to post its pending queue over IPC.
pub const FETCH_QUEUE_COMMAND: &str = "WebViewJavascriptBridge._flushToNative();";

/// The injected counterpart. Idempotent: a second evaluation is a no-op.
pub const BRIDGE_JS: &str = r#"
;(function() {
    if (window.WebViewJavascriptBridge) {
        return;
    }

    var sendMessageQueue = [];
    var messageHandlers = {};
    var responseCallbacks = {};
    var uniqueId = 1;
    var dispatchWithTimeoutSafety = true;

    function registerHandler(handlerName, handler) {
        messageHandlers[handlerName] = handler;
    }

    function callHandler(handlerName, data, responseCallback) {
        if (arguments.length == 2 && typeof data == 'function') {
            responseCallback = data;
            data = null;
        }
        doSend({ handlerName: handlerName, data: data }, responseCallback);
    }

    function disableJavascriptAlertBoxSafetyTimeout() {
        dispatchWithTimeoutSafety = false;
    }

    function doSend(message, responseCallback) {
        if (responseCallback) {
            var callbackId = 'cb_' + (uniqueId++) + '_' + new Date().getTime();
            responseCallbacks[callbackId] = responseCallback;
            message['callbackId'] = callbackId;
        }
        sendMessageQueue.push(message);
        flushToNative();
    }

    function fetchQueue() {
        var messageQueueString = JSON.stringify(sendMessageQueue);
        sendMessageQueue = [];
        return messageQueueString;
    }

    function flushToNative() {
        if (!sendMessageQueue.length) {
            return;
        }
        window.ipc.postMessage(JSON.stringify({ kind: 'wvjb_queue', payload: fetchQueue() }));
    }

    function dispatchMessageFromNative(messageJSON) {
        if (dispatchWithTimeoutSafety) {
            setTimeout(doDispatch);
        } else {
            doDispatch();
        }

        function doDispatch() {
            var message = JSON.parse(messageJSON);
            if (message.responseId) {
                var callback = responseCallbacks[message.responseId];
                if (!callback) {
                    return;
                }
                delete responseCallbacks[message.responseId];
                callback(message.responseData);
                return;
            }

            var responseCallback = function() {};
            if (message.callbackId) {
                var callbackResponseId = message.callbackId;
                responseCallback = function(responseData) {
                    doSend({
                        handlerName: message.handlerName,
                        responseId: callbackResponseId,
                        responseData: responseData
                    });
                };
            }

            var handler = messageHandlers[message.handlerName];
            if (!handler) {
                console.log('WebViewJavascriptBridge: WARNING: no handler for message from native:', message);
            } else {
                handler(message.data, responseCallback);
            }
        }
    }

    window.WebViewJavascriptBridge = {
        registerHandler: registerHandler,
        callHandler: callHandler,
        disableJavascriptAlertBoxSafetyTimeout: disableJavascriptAlertBoxSafetyTimeout,
        _fetchQueue: fetchQueue,
        _flushToNative: flushToNative,
        _handleMessageFromNative: dispatchMessageFromNative
    };

    registerHandler('_disableJavascriptAlertBoxSafetyTimeout', disableJavascriptAlertBoxSafetyTimeout);

    setTimeout(function() {
        var callbacks = window.WVJBCallbacks;
        delete window.WVJBCallbacks;
        if (!callbacks) {
            return;
        }
        for (var i = 0; i < callbacks.length; i++) {
            callbacks[i](window.WebViewJavascriptBridge);
        }
    }, 0);
})();
"#;

/// Encode `text` as a JavaScript string literal.
///
/// JSON string escaping covers quotes, backslashes and control characters;
/// U+2028 and U+2029 are escaped too because older engines treat them as
/// line terminators inside literals.
pub fn js_string_literal(text: &str) -> String {
    serde_json::to_string(text)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Script that hands one message to the counterpart.
pub fn dispatch_command(message_json: &str) -> String {
    format!(
        "WebViewJavascriptBridge._handleMessageFromNative({});",
        js_string_literal(message_json)
    )
}

/// The counterpart, optionally stamped with a version tag.
pub fn bridge_script(js_version: Option<&str>) -> String {
    match js_version {
        Some(version) => format!(
            "{BRIDGE_JS}\nwindow.WebViewJavascriptBridge.version = {};\n",
            js_string_literal(version)
        ),
        None => BRIDGE_JS.to_string(),
    }
}
