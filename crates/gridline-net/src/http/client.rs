use std::sync::Arc;

use gridline_core::logging::targets;
use http::{HeaderMap, HeaderName, HeaderValue};

use super::config::HttpClientConfig;
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// A pooled client for page requests.
///
/// Clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<reqwest::Client>,
}

impl HttpClient {
    /// A client with the default transport settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&HttpClientConfig::default())
    }

    /// Build a client from grid transport settings.
    ///
    /// Fails with [`NetworkError::InvalidHeader`] if a configured header is
    /// not a legal HTTP header.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(header_map(config)?);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(builder.build()?),
        })
    }

    /// Issue a GET for `url` (query string included).
    pub async fn get(&self, url: url::Url) -> Result<HttpResponse> {
        tracing::debug!(target: targets::NET, %url, "GET");
        let response = self.inner.get(url).send().await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}

fn header_map(config: &HttpClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(config.headers.len());
    for (name, value) in &config.headers {
        let invalid = |reason: String| NetworkError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let key = HeaderName::try_from(name.as_str()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::try_from(value.as_str()).map_err(|e| invalid(e.to_string()))?;
        headers.insert(key, value);
    }
    Ok(headers)
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}
