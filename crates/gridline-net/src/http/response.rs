use serde_json::Value;

use crate::error::{NetworkError, Result};

/// A response to a page request.
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self { inner: response }
    }

    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Value of header `name` (case-insensitive), if present and ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Reject 4xx/5xx answers; a non-empty body becomes the error message.
    pub async fn error_for_status(self) -> Result<Self> {
        if self.inner.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let body = self.inner.text().await.unwrap_or_default();
        Err(NetworkError::HttpStatus {
            status,
            message: Some(body).filter(|b| !b.trim().is_empty()),
        })
    }

    /// Decode the body as JSON.
    pub async fn json_body(self) -> Result<Value> {
        let bytes = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("url", &self.inner.url().as_str())
            .finish()
    }
}
