//! web-sys adapters for the controller's capabilities.

pub mod camera;
pub mod file;
pub mod renderer;
pub mod service_worker;
pub mod stream;

use leptos::prelude::*;
use tracing::warn;

use crate::config::ClientConfig;

/// `<meta name="eco-scan-api-base" content="...">` overrides the service URL.
const API_BASE_META: &str = "eco-scan-api-base";

/// Build the client config from the hosting page, falling back to defaults.
pub fn page_config() -> ClientConfig {
    let override_base = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| {
            doc.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META))
                .ok()
                .flatten()
        })
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|content| !content.trim().is_empty());

    match override_base {
        Some(base) => ClientConfig::with_base_url(&base).unwrap_or_else(|e| {
            warn!("Ignoring API base override: {}", e);
            ClientConfig::default()
        }),
        None => ClientConfig::default(),
    }
}

/// The config `main` built for this page, or the defaults when none was
/// provided. Never re-reads the document.
pub fn client_config() -> ClientConfig {
    use_context::<ClientConfig>().unwrap_or_default()
}

/// The controller wired to the real service, camera and page signals.
pub type PageController = crate::controller::Controller<
    crate::api::HttpAnalysisApi,
    camera::BrowserCamera,
    renderer::PageState,
>;
