//! Error types for remote page fetching.

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The endpoint URL does not parse.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    /// A configured header is not a legal HTTP header.
    #[error("invalid request header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// No response within the configured timeout.
    #[error("page request timed out")]
    Timeout,

    /// The server could not be reached.
    #[error("could not connect: {0}")]
    Connection(String),

    /// Any other transport failure.
    #[error("page request failed: {0}")]
    Request(String),

    /// The server answered with a 4xx or 5xx status.
    #[error("server answered HTTP {status}{}", detail(.message))]
    HttpStatus {
        status: u16,
        /// Response body, when there was one.
        message: Option<String>,
    },

    /// The body is not JSON.
    #[error("response body is not JSON: {0}")]
    Json(String),

    /// The body is JSON but not a row array.
    #[error("unexpected response body: {0}")]
    InvalidBody(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl NetworkError {
    /// The HTTP status code, if the server answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result of a page-fetch operation.
pub type Result<T> = std::result::Result<T, NetworkError>;
