//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Base URL used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "https://lereacteur-bootcamp-api.herokuapp.com/api/airbnb";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration of the remote API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the marketplace API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
