use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SERVICE_WORKER_SCRIPT: &str = "/sw.js";

/// Where the client talks to. Built once at page load and handed to the
/// HTTP client; there is no other global configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_base_url: String,
    pub service_worker_script: String,
}

impl ClientConfig {
    /// Build a config for the given service base URL.
    /// The URL must be absolute http(s); a trailing slash is dropped.
    pub fn with_base_url(base: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base.trim())
            .map_err(|e| ClientError::Config(format!("Invalid API base URL '{}': {}", base, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            api_base_url: parsed.as_str().trim_end_matches('/').to_string(),
            service_worker_script: DEFAULT_SERVICE_WORKER_SCRIPT.to_string(),
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Absolute URL of a service endpoint, e.g. `endpoint("analyze")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            service_worker_script: DEFAULT_SERVICE_WORKER_SCRIPT.to_string(),
        }
    }
}
