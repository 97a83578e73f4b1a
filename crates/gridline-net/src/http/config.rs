use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transport settings for remote grids.
///
/// Loaded from the `http` section of the grid options:
///
/// ```json
/// "http": { "timeoutMs": 5000, "headers": { "Authorization": "Bearer t" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpClientConfig {
    /// Whole-request timeout in milliseconds; `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Sent as `User-Agent`.
    pub user_agent: String,
    /// Sent with every page request.
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Some(30_000),
            connect_timeout_ms: 10_000,
            user_agent: format!("gridline/{}", env!("CARGO_PKG_VERSION")),
            headers: BTreeMap::new(),
        }
    }
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: HttpClientConfig =
            serde_json::from_value(json!({"timeoutMs": 1500, "headers": {"x-tenant": "acme"}}))
                .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.headers["x-tenant"], "acme");
        assert!(config.user_agent.starts_with("gridline/"));
    }

    #[test]
    fn test_null_timeout_disables_it() {
        let config: HttpClientConfig = serde_json::from_value(json!({"timeoutMs": null})).unwrap();
        assert_eq!(config.timeout(), None);
    }
}
