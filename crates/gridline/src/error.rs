//! Error types for grid operations.

use gridline_net::NetworkError;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while configuring or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Options failed validation.
    #[error("Invalid grid configuration: {0}")]
    Config(String),

    /// Options could not be parsed from JSON or TOML.
    #[error("Failed to parse grid options: {0}")]
    ConfigParse(String),

    /// A filter value was rejected for a column.
    #[error("{message}")]
    Validation { column: String, message: String },

    /// A filter value could not be compiled into a matcher.
    #[error("Invalid filter pattern for '{column}': {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// A remote fetch failed.
    #[error("Remote fetch failed: {0}")]
    Network(#[from] NetworkError),

    /// A fetch was requested but the grid has no remote source.
    #[error("No remote data source is configured")]
    NoRemoteSource,
}

impl GridError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error for `column`.
    pub fn validation(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a pattern error for `column`.
    pub fn invalid_pattern(column: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            column: column.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
