//! Built-in demo page.

pub const DEMO_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<style>
  body { font: 14px -apple-system, sans-serif; margin: 24px; }
  #log { font-family: monospace; white-space: pre-wrap; }
</style>
</head>
<body>
<h1>Bridge demo</h1>
<button id="echo">Call native echo</button>
<button id="missing">Call unknown native handler</button>
<div id="log"></div>
<script>
function log(text) {
  var el = document.getElementById('log');
  el.textContent += text + '\n';
}

function setupWebViewJavascriptBridge(callback) {
  if (window.WebViewJavascriptBridge) { return callback(WebViewJavascriptBridge); }
  if (window.WVJBCallbacks) { return window.WVJBCallbacks.push(callback); }
  window.WVJBCallbacks = [callback];
  var iframe = document.createElement('iframe');
  iframe.style.display = 'none';
  iframe.src = 'https://__bridge_loaded__';
  document.documentElement.appendChild(iframe);
  setTimeout(function() { document.documentElement.removeChild(iframe); }, 0);
}

setupWebViewJavascriptBridge(function(bridge) {
  bridge.registerHandler('greet', function(data, responseCallback) {
    log('native says: ' + JSON.stringify(data));
    responseCallback({ greeting: 'hello from JS', version: bridge.version || null });
  });

  document.getElementById('echo').onclick = function() {
    bridge.callHandler('echo', { sent: Date.now() }, function(response) {
      log('echo replied: ' + JSON.stringify(response));
    });
  };

  document.getElementById('missing').onclick = function() {
    bridge.callHandler('doesNotExist', null);
  };
});
</script>
</body>
</html>
"#;
