//! Per-fetch handle with lazy, at-most-once resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::trace;

use crate::Result;
use crate::resolver::ArtifactResolver;
use crate::source::{ArtifactSource, FetchRequest, SourceLocation};

/// One artifact fetch.
///
/// The source is searched the first time a location is needed; later calls
/// reuse the stored [`SourceLocation`]. Use one handle per artifact.
#[derive(Debug)]
pub struct ArtifactFetch {
    source: ArtifactSource,
    resolver: Arc<ArtifactResolver>,
    location: OnceCell<SourceLocation>,
}

impl ArtifactFetch {
    /// Create a fetch handle for `source`.
    #[must_use]
    pub fn new(source: ArtifactSource, resolver: Arc<ArtifactResolver>) -> Self {
        Self {
            source,
            resolver,
            location: OnceCell::new(),
        }
    }

    /// The source this handle fetches.
    #[must_use]
    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    /// The location, if already resolved.
    #[must_use]
    pub fn resolved(&self) -> Option<&SourceLocation> {
        self.location.get()
    }

    /// Resolve the download location, searching at most once.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors. A failed resolution is not cached and
    /// is retried on the next call.
    pub async fn source_location(&self) -> Result<&SourceLocation> {
        self.location
            .get_or_try_init(|| self.resolver.locate(&self.source))
            .await
    }

    /// Path in `cache_dir` where the downloaded artifact is stored.
    ///
    /// # Errors
    ///
    /// Propagates resolution and [`crate::cache::cache_path`] errors.
    pub async fn downloaded_file(&self, cache_dir: &Path) -> Result<PathBuf> {
        let location = self.source_location().await?;
        let path = self
            .resolver
            .downloaded_file(&self.source, location, cache_dir)?;
        trace!(?path, "Cache path for artifact");
        Ok(path)
    }

    /// The request to hand to the network fetcher.
    ///
    /// # Errors
    ///
    /// Same as [`Self::downloaded_file`].
    pub async fn fetch_request(&self, cache_dir: &Path) -> Result<FetchRequest> {
        let path = self.downloaded_file(cache_dir).await?;
        let location = self.source_location().await?;
        Ok(FetchRequest {
            url: location.url.clone(),
            sha1: location.sha1.clone(),
            authorization: location.authorization.clone(),
            path,
        })
    }
}
