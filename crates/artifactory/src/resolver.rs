//! Turns an [`ArtifactSource`] into one concrete artifact.
//!
//! Resolution searches the index by name, keeps only candidates stored under
//! `{endpoint}/{repository}{path}`, and picks the newest by creation time.
//! The selection is deterministic: ties keep the index order and the
//! last-listed candidate wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache;
use crate::config::{ArtifactoryConfig, PASSWORD_ENV, USERNAME_ENV};
use crate::credential::Credential;
use crate::index::{ArtifactIndex, ArtifactRecord, HttpArtifactIndex, SearchQuery};
use crate::source::{ArtifactSource, ResolvedArtifact, SourceLocation};
use crate::{Error, Result};

/// Resolves artifact sources against an [`ArtifactIndex`].
#[derive(Clone)]
pub struct ArtifactResolver {
    config: ArtifactoryConfig,
    index: Arc<dyn ArtifactIndex>,
}

impl std::fmt::Debug for ArtifactResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ArtifactResolver {
    /// Create a resolver over `index` with the given defaults.
    #[must_use]
    pub fn new(config: ArtifactoryConfig, index: Arc<dyn ArtifactIndex>) -> Self {
        Self { config, index }
    }

    /// Create a resolver over the Artifactory REST API, with defaults read
    /// from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            ArtifactoryConfig::from_env(),
            Arc::new(HttpArtifactIndex::new()?),
        ))
    }

    /// The configured defaults.
    #[must_use]
    pub fn config(&self) -> &ArtifactoryConfig {
        &self.config
    }

    /// Server base URL for `source`, without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when neither the source nor the
    /// configuration names an endpoint.
    pub fn resolve_endpoint<'a>(&'a self, source: &'a ArtifactSource) -> Result<&'a str> {
        source
            .endpoint
            .as_deref()
            .or_else(|| self.config.endpoint())
            .map(|endpoint| endpoint.trim_end_matches('/'))
            .ok_or_else(|| Error::configuration("Artifactory endpoint not configured"))
    }

    /// Authorization for `source`: its own value, or Basic auth built from
    /// the configured username and password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the source has no authorization
    /// and the username or password is not configured.
    pub fn resolve_credential(&self, source: &ArtifactSource) -> Result<Credential> {
        if let Some(credential) = &source.authorization {
            return Ok(credential.clone());
        }

        let (username, password) = self.config.basic_auth().ok_or_else(|| {
            Error::configuration(format!(
                "You have to provide either an authorization for the source or both \
                 {USERNAME_ENV} and {PASSWORD_ENV} for the Artifactory client"
            ))
        })?;
        Ok(Credential::basic(username, password))
    }

    /// Search the index and select the artifact `source` describes.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for a missing pattern, repository,
    ///   endpoint or credential
    /// - [`Error::NotFound`] when nothing matches, or nothing matches under
    ///   the required path
    /// - [`Error::MissingChecksum`] when the selected artifact has no SHA-1
    /// - index errors, unchanged
    pub async fn find_source_url(&self, source: &ArtifactSource) -> Result<ResolvedArtifact> {
        let (artifact, _) = self.search(source).await?;
        Ok(artifact)
    }

    /// Where to download `source` from.
    ///
    /// A source with an explicit `url` is returned as-is, without touching
    /// the index or requiring credentials.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_source_url`].
    pub async fn locate(&self, source: &ArtifactSource) -> Result<SourceLocation> {
        if let Some(url) = &source.url {
            debug!(%url, "Using explicit artifact URL");
            return Ok(SourceLocation {
                url: url.clone(),
                sha1: source.sha1.clone(),
                authorization: source.authorization.clone(),
            });
        }

        let (artifact, credential) = self.search(source).await?;
        Ok(SourceLocation {
            url: artifact.download_url,
            sha1: Some(artifact.checksum),
            authorization: Some(credential),
        })
    }

    /// Path in `cache_dir` where the artifact at `location` is stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when no file name can be derived, or
    /// [`Error::InvalidCachedName`] when `cached_name` is not a plain file name.
    pub fn downloaded_file(
        &self,
        source: &ArtifactSource,
        location: &SourceLocation,
        cache_dir: &Path,
    ) -> Result<PathBuf> {
        cache::cache_path(source, &location.url, cache_dir)
    }

    async fn search(&self, source: &ArtifactSource) -> Result<(ResolvedArtifact, Credential)> {
        if source.pattern.is_empty() {
            return Err(Error::configuration("Artifact pattern must not be empty"));
        }
        if source.repository.is_empty() {
            return Err(Error::configuration("Artifact repository must not be empty"));
        }

        info!(
            pattern = %source.pattern,
            repository = %source.repository,
            "Searching Artifactory"
        );

        let endpoint = self.resolve_endpoint(source)?;
        let credential = self.resolve_credential(source)?;

        debug!(path = %source.path, repository = %source.repository, "Path to file");

        let query = SearchQuery {
            endpoint,
            authorization: Some(&credential),
            name: &source.pattern,
            repository: &source.repository,
        };
        let candidates = self.index.search(&query).await?;

        if candidates.is_empty() {
            return Err(Error::not_found(&source.pattern, &source.repository));
        }

        let prefix = format!("{endpoint}/{}{}", source.repository, source.path);
        let record = select_newest(candidates, &prefix).ok_or_else(|| {
            Error::filtered_out(&source.pattern, &source.repository, &source.path)
        })?;

        debug!(?record, "Found artifact");

        let checksum = record
            .checksums
            .sha1
            .clone()
            .ok_or_else(|| Error::MissingChecksum {
                url: record.download_uri.clone(),
            })?;

        info!(url = %record.download_uri, sha1 = %checksum, "Found artifact");

        Ok((
            ResolvedArtifact {
                download_url: record.download_uri,
                checksum,
                created: record.created,
            },
            credential,
        ))
    }
}

/// The newest candidate whose directory starts with `prefix`.
///
/// Sorting is stable, so among equal creation times the one listed last by
/// the index is selected.
fn select_newest(mut candidates: Vec<ArtifactRecord>, prefix: &str) -> Option<ArtifactRecord> {
    candidates.retain(|record| directory_of(&record.download_uri).starts_with(prefix));
    candidates.sort_by_key(|record| record.created);
    candidates.pop()
}

/// `url` without its last segment, keeping the trailing `/`.
fn directory_of(url: &str) -> &str {
    match url.rfind('/') {
        Some(index) => &url[..=index],
        None => "",
    }
}
