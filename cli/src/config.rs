use std::path::PathBuf;
use std::time::Duration;

use clash_tracker_shared::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_STORE_PATH: &str = ".clash-tracker.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: api_base_url(),
            request_timeout: http_timeout(),
            connect_timeout: connect_timeout(),
            store_path: store_path(),
        }
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_overrides(mut self, base_url: Option<String>, store_path: Option<PathBuf>) -> Self {
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(store_path) = store_path {
            self.store_path = store_path;
        }
        self
    }
}

pub fn api_base_url() -> String {
    std::env::var("CLASH_API_BASE_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn http_timeout() -> Duration {
    std::env::var("CLASH_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

pub fn connect_timeout() -> Duration {
    std::env::var("CLASH_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
}

pub fn store_path() -> PathBuf {
    std::env::var_os("CLASH_STORE_PATH")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
}
