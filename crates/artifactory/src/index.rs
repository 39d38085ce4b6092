//! Artifactory search client.
//!
//! [`ArtifactIndex`] is the seam between resolution and the server.
//! [`HttpArtifactIndex`] talks to the REST artifact search API:
//! `GET {endpoint}/api/search/artifact?name=<pattern>&repos=<repo>` with
//! `X-Result-Detail: info`, so each result already carries its download URI,
//! checksums and creation time.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

use crate::credential::Credential;
use crate::{Error, Result};

/// Default request timeout for search calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One search, fully parameterized.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    /// Server base URL without a trailing slash.
    pub endpoint: &'a str,
    /// `Authorization` header value.
    pub authorization: Option<&'a Credential>,
    /// Artifact name pattern.
    pub name: &'a str,
    /// Repository to search.
    pub repository: &'a str,
}

/// Checksums reported for an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Checksums {
    /// SHA-1 hex digest.
    #[serde(default)]
    pub sha1: Option<String>,
    /// MD5 hex digest.
    #[serde(default)]
    pub md5: Option<String>,
    /// SHA-256 hex digest.
    #[serde(default)]
    pub sha256: Option<String>,
}

/// A search candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    /// Absolute download URL.
    pub download_uri: String,
    /// Reported checksums.
    #[serde(default)]
    pub checksums: Checksums,
    /// Creation time.
    pub created: DateTime<FixedOffset>,
    /// Repository key, when reported.
    #[serde(default)]
    pub repo: Option<String>,
    /// Path inside the repository, when reported.
    #[serde(default)]
    pub path: Option<String>,
}

/// Remote lookup of artifacts by name.
///
/// Implementations return every match as a sequence; an empty vector means
/// nothing matched. Transport errors are returned as-is.
#[async_trait]
pub trait ArtifactIndex: Send + Sync {
    /// Search for artifacts named like `query.name` in `query.repository`.
    async fn search(&self, query: &SearchQuery<'_>) -> Result<Vec<ArtifactRecord>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<ArtifactRecord>>,
}

/// [`ArtifactIndex`] backed by the Artifactory REST API.
#[derive(Debug, Clone)]
pub struct HttpArtifactIndex {
    client: Client,
}

impl HttpArtifactIndex {
    /// Create a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("artifetch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtifactIndex for HttpArtifactIndex {
    async fn search(&self, query: &SearchQuery<'_>) -> Result<Vec<ArtifactRecord>> {
        let url = format!("{}/api/search/artifact", query.endpoint);
        debug!(%url, name = query.name, repository = query.repository, "Querying artifact search");

        let mut request = self
            .client
            .get(&url)
            .query(&[("name", query.name), ("repos", query.repository)])
            .header("X-Result-Detail", "info");

        if let Some(credential) = query.authorization {
            request = request.header(reqwest::header::AUTHORIZATION, credential.expose());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(%url, "Search endpoint reported no matches");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            return Err(Error::index(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        let results = parsed.results.unwrap_or_default();

        trace!(count = results.len(), "Parsed search results");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "results": [{
                "uri": "https://host/artifactory/api/storage/libs-release/com/acme/app-1.0.tar.gz",
                "downloadUri": "https://host/artifactory/libs-release/com/acme/app-1.0.tar.gz",
                "repo": "libs-release",
                "path": "/com/acme/app-1.0.tar.gz",
                "created": "2024-03-01T10:15:30.123+01:00",
                "size": "1024",
                "checksums": {
                    "sha1": "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
                    "md5": "9e107d9d372bb6826bd81d3542a419d6"
                }
            }]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let results = parsed.results.unwrap();
        assert_eq!(results.len(), 1);

        let record = &results[0];
        assert_eq!(
            record.download_uri,
            "https://host/artifactory/libs-release/com/acme/app-1.0.tar.gz"
        );
        assert_eq!(
            record.checksums.sha1.as_deref(),
            Some("2fd4e1c67a2d28fced849ee1bb76e7391b93eb12")
        );
        assert!(record.checksums.sha256.is_none());
        assert_eq!(record.repo.as_deref(), Some("libs-release"));
        assert_eq!(
            record.created,
            DateTime::parse_from_rfc3339("2024-03-01T09:15:30.123Z").unwrap()
        );
    }

    #[test]
    fn test_parse_null_results() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(parsed.results.is_none());

        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_none());
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpArtifactIndex::new().is_ok());
    }
}
