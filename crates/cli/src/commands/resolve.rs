//! `artifetch resolve`: search Artifactory and print the fetch request.

use std::sync::Arc;

use artifetch_artifactory::{
    ArtifactFetch, ArtifactResolver, ArtifactSource, ArtifactoryConfig, Credential, FetchRequest,
    HttpArtifactIndex, default_cache_dir,
};
use tracing::{info, instrument};

use super::{OutputFormat, ResolveOptions};
use crate::errors::{CliError, CliResult};

/// Build the artifact source from a source file and/or flags.
pub fn build_source(options: &ResolveOptions) -> CliResult<ArtifactSource> {
    let mut source = match &options.source_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::invalid_source(path, e))?;
            serde_json::from_str::<ArtifactSource>(&content)
                .map_err(|e| CliError::invalid_source(path, e))?
        }
        None => ArtifactSource::new(
            options
                .pattern
                .clone()
                .ok_or_else(|| CliError::missing_argument("<PATTERN>"))?,
            String::new(),
        ),
    };

    if let Some(repository) = &options.repository {
        source.repository.clone_from(repository);
    }
    if source.repository.is_empty() {
        return Err(CliError::missing_argument("--repository"));
    }
    if let Some(path) = &options.path {
        source.path.clone_from(path);
    }
    if let Some(endpoint) = &options.endpoint {
        source.endpoint = Some(endpoint.clone());
    }
    if let Some(url) = &options.url {
        source.url = Some(url.clone());
        source.sha1.clone_from(&options.sha1);
    }
    if let Some(cached_name) = &options.cached_name {
        source.cached_name = Some(cached_name.clone());
    }
    if let Some(authorization) = &options.authorization {
        source.authorization = Some(Credential::new(authorization.clone()));
    }

    Ok(source)
}

/// Defaults handed to the resolver: `base` (usually the environment) with
/// explicit flags on top.
pub fn build_config(options: &ResolveOptions, base: ArtifactoryConfig) -> ArtifactoryConfig {
    let mut config = base;
    if let Some(endpoint) = &options.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(username) = &options.username {
        config = config.with_username(username.clone());
    }
    if let Some(password) = &options.password {
        config = config.with_password(password.clone());
    }
    config
}

/// Render a fetch request for stdout.
pub fn render(request: &FetchRequest, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(request).map_err(|source| CliError::Output { source })
        }
        OutputFormat::Text => {
            let mut lines = vec![format!("url: {}", request.url)];
            if let Some(sha1) = &request.sha1 {
                lines.push(format!("sha1: {sha1}"));
            }
            lines.push(format!("path: {}", request.path.display()));
            Ok(lines.join("\n"))
        }
    }
}

/// Resolve the artifact and return the rendered fetch request.
#[instrument(skip(options), fields(format = ?options.format))]
pub async fn execute_resolve(options: &ResolveOptions) -> CliResult<String> {
    let source = build_source(options)?;
    let index = HttpArtifactIndex::with_timeout(options.timeout)?;
    let resolver = Arc::new(ArtifactResolver::new(
        build_config(options, ArtifactoryConfig::from_env()),
        Arc::new(index),
    ));
    let cache_dir = options.cache_dir.clone().unwrap_or_else(default_cache_dir);

    let fetch = ArtifactFetch::new(source, resolver);
    let request = fetch.fetch_request(&cache_dir).await?;

    info!(url = %request.url, path = ?request.path, "Resolved artifact");
    render(&request, options.format)
}
