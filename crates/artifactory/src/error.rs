//! Error types for Artifactory resolution.

use thiserror::Error;

/// Result type for Artifactory resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an artifact.
#[derive(Error, Debug)]
pub enum Error {
    /// Endpoint or credentials are missing, or the source is incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The search returned nothing, or nothing under the required path.
    #[error("{}", not_found_message(.pattern, .repository, .path.as_deref()))]
    NotFound {
        /// The artifact name pattern searched for.
        pattern: String,
        /// The repository that was searched.
        repository: String,
        /// The path prefix, when candidates were found elsewhere.
        path: Option<String>,
    },

    /// The selected artifact does not report a SHA-1 checksum.
    #[error("Artifact {url} has no sha1 checksum")]
    MissingChecksum {
        /// Download URL of the artifact.
        url: String,
    },

    /// No file name can be derived from a download URL.
    #[error("Invalid download URL '{0}': no file name")]
    InvalidUrl(String),

    /// A cached name that is not a single plain file name.
    #[error("Invalid cached name '{0}': must be a plain file name")]
    InvalidCachedName(String),

    /// The search API answered with a non-success status.
    #[error("Artifactory search failed (HTTP {status}): {message}")]
    Index {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a not found error for an empty search.
    #[must_use]
    pub fn not_found(pattern: impl Into<String>, repository: impl Into<String>) -> Self {
        Self::NotFound {
            pattern: pattern.into(),
            repository: repository.into(),
            path: None,
        }
    }

    /// Create a not found error for a search whose candidates all lived
    /// outside the required path.
    #[must_use]
    pub fn filtered_out(
        pattern: impl Into<String>,
        repository: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            pattern: pattern.into(),
            repository: repository.into(),
            path: Some(path.into()),
        }
    }

    /// Create an index error from a status and message.
    #[must_use]
    pub fn index(status: u16, message: impl Into<String>) -> Self {
        Self::Index {
            status,
            message: message.into(),
        }
    }

    /// Whether this error means the artifact does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn not_found_message(pattern: &str, repository: &str, path: Option<&str>) -> String {
    match path {
        Some(path) => format!("Unable to find {pattern} in {repository} with path {path}"),
        None => format!("Unable to find {pattern} in {repository}"),
    }
}
