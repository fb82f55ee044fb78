use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use tracing::{info, warn};

/// Register the app-shell service worker if the browser supports it.
/// The outcome is only logged.
pub fn register(script: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        info!("Service workers are not supported; skipping registration");
        return;
    }

    let promise = navigator.service_worker().register(script);
    let script = script.to_string();
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => info!("Service worker registered: {}", script),
            Err(e) => warn!("Service worker registration failed: {:?}", e),
        }
    });
}
