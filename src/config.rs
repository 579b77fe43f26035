use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backend used when `BLOG_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "https://blog-backend-xzn7.onrender.com/api";

/// Client configuration.
///
/// The browser bundle has no filesystem or process environment, so the API
/// base URL is baked in at compile time. Hosts that embed the app may still
/// override it by deserializing their own JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    pub search: SearchConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Build the config from build-time environment variables.
    ///
    /// Reads `BLOG_API_BASE_URL`; everything else keeps its default.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("BLOG_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}

/// Tuning for the live search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum number of trimmed characters before a live lookup runs.
    pub min_query_len: usize,
    /// Quiet interval after the last keystroke, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            debounce_ms: 300,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "search": { "debounce_ms": 150 } }"#).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.min_query_len, 2);
    }
}
