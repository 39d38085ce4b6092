//! Source descriptions and resolution outputs.

use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

use crate::credential::Credential;

/// Description of the artifact to fetch.
///
/// Deserializes from the pipeline's source block; `filename_pattern` is
/// accepted as an alias of `pattern`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtifactSource {
    /// Artifact name pattern (`*` and `?` wildcards).
    #[serde(alias = "filename_pattern")]
    pub pattern: String,
    /// Repository to search.
    pub repository: String,
    /// Required path prefix below the repository root, e.g. `/com/acme/`.
    #[serde(default)]
    pub path: String,
    /// Server base URL. Falls back to the configured default.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Known download URL. When set, no search is performed.
    #[serde(default)]
    pub url: Option<String>,
    /// SHA-1 checksum accompanying an explicit `url`.
    #[serde(default)]
    pub sha1: Option<String>,
    /// `Authorization` header value. Synthesized from the configured
    /// username and password when absent.
    #[serde(default)]
    pub authorization: Option<Credential>,
    /// Local file name override for the cached download.
    #[serde(default)]
    pub cached_name: Option<String>,
}

impl ArtifactSource {
    /// Create a source that searches `repository` for `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            repository: repository.into(),
            ..Self::default()
        }
    }

    /// Require the artifact to live under `path`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the server base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use a known download URL and skip the search.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the checksum for an explicit URL.
    #[must_use]
    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }

    /// Set the authorization header value.
    #[must_use]
    pub fn with_authorization(mut self, credential: Credential) -> Self {
        self.authorization = Some(credential);
        self
    }

    /// Override the cached file name.
    #[must_use]
    pub fn with_cached_name(mut self, name: impl Into<String>) -> Self {
        self.cached_name = Some(name.into());
        self
    }
}

/// An artifact selected by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Absolute download URL.
    pub download_url: String,
    /// SHA-1 checksum reported by the index.
    pub checksum: String,
    /// Creation time; only used to order candidates.
    pub created: chrono::DateTime<chrono::FixedOffset>,
}

/// Where to download an artifact from, and with which credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Download URL.
    pub url: String,
    /// Expected SHA-1 checksum, when known.
    pub sha1: Option<String>,
    /// `Authorization` header value for the download.
    pub authorization: Option<Credential>,
}

/// Everything the network fetcher needs to materialize an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchRequest {
    /// Download URL.
    pub url: String,
    /// Expected SHA-1 checksum, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// `Authorization` header value. Serialized redacted.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_redacted"
    )]
    pub authorization: Option<Credential>,
    /// Local cache file path.
    pub path: PathBuf,
}

fn serialize_redacted<S>(
    credential: &Option<Credential>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match credential {
        Some(credential) => serializer.serialize_str(&credential.to_string()),
        None => serializer.serialize_none(),
    }
}
