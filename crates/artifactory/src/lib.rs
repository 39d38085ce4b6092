//! Artifactory artifact resolution for artifetch.
//!
//! This crate turns a symbolic artifact description (name pattern,
//! repository, path prefix) into one concrete download:
//! - Search the Artifactory index by name
//! - Keep only candidates stored under the required path
//! - Pick the newest candidate by creation time
//! - Compute where the download lives in the local cache
//!
//! Downloading and verifying the bytes is left to the caller's network
//! fetcher, which consumes the [`FetchRequest`] produced here.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use artifetch_artifactory::{ArtifactFetch, ArtifactResolver, ArtifactSource};
//!
//! let resolver = Arc::new(ArtifactResolver::from_env()?);
//! let source = ArtifactSource::new("app-*.tar.gz", "libs-release").with_path("/com/acme/");
//! let fetch = ArtifactFetch::new(source, resolver);
//!
//! let request = fetch.fetch_request(&cache_dir).await?;
//! ```

#![warn(missing_docs)]

pub mod cache;
mod config;
mod credential;
mod error;
mod fetch;
mod index;
mod resolver;
mod source;

#[cfg(test)]
mod test_utils;

pub use cache::default_cache_dir;
pub use config::{ArtifactoryConfig, ENDPOINT_ENV, PASSWORD_ENV, USERNAME_ENV};
pub use credential::Credential;
pub use error::{Error, Result};
pub use fetch::ArtifactFetch;
pub use index::{
    ArtifactIndex, ArtifactRecord, Checksums, DEFAULT_TIMEOUT, HttpArtifactIndex, SearchQuery,
};
pub use resolver::ArtifactResolver;
pub use source::{ArtifactSource, FetchRequest, ResolvedArtifact, SourceLocation};
