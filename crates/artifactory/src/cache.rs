//! Local cache locations for downloaded artifacts.

use std::path::{Component, Path, PathBuf};

use crate::source::ArtifactSource;
use crate::{Error, Result};

/// Default cache root: `~/.cache/artifetch` (platform equivalent).
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("artifetch")
}

/// File name for a download URL: the last path segment, without query
/// string or fragment.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the URL ends in `/` or is empty.
pub fn file_name_from_url(url: &str) -> Result<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let name = path.rsplit('/').next().unwrap_or(path);

    if name.is_empty() {
        return Err(Error::InvalidUrl(url.to_string()));
    }
    Ok(name)
}

/// Path on disk where the artifact behind `url` is cached.
///
/// `source.cached_name` wins over the URL's file name.
///
/// # Errors
///
/// - [`Error::InvalidCachedName`] when `cached_name` is not a single plain
///   file name (absolute, empty, `..`, or containing separators)
/// - [`Error::InvalidUrl`] when no `cached_name` is set and the URL has no
///   file name
pub fn cache_path(source: &ArtifactSource, url: &str, cache_dir: &Path) -> Result<PathBuf> {
    let name = match source.cached_name.as_deref() {
        Some(name) => validate_cached_name(name)?,
        None => file_name_from_url(url)?,
    };
    Ok(cache_dir.join(name))
}

/// A cached name must stay inside the cache directory.
fn validate_cached_name(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(Error::InvalidCachedName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_strips_query() {
        assert_eq!(
            file_name_from_url("https://host/repo/path/app-1.2.3.tar.gz?sig=abc").unwrap(),
            "app-1.2.3.tar.gz"
        );
    }

    #[test]
    fn test_file_name_plain() {
        assert_eq!(
            file_name_from_url("https://host/repo/path/app-1.2.3.tar.gz").unwrap(),
            "app-1.2.3.tar.gz"
        );
    }

    #[test]
    fn test_file_name_strips_fragment() {
        assert_eq!(
            file_name_from_url("https://host/repo/app.zip#top").unwrap(),
            "app.zip"
        );
    }

    #[test]
    fn test_file_name_trailing_slash() {
        let err = file_name_from_url("https://host/repo/path/").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_cache_path_uses_url() {
        let source = ArtifactSource::new("app-*", "repo");
        let path = cache_path(
            &source,
            "https://host/repo/path/app-1.2.3.tar.gz?sig=abc",
            Path::new("/var/cache/artifetch"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/var/cache/artifetch/app-1.2.3.tar.gz"));
    }

    #[test]
    fn test_cache_path_prefers_cached_name() {
        let source = ArtifactSource::new("app-*", "repo").with_cached_name("custom.tar.gz");
        let path = cache_path(
            &source,
            "https://host/repo/path/app-1.2.3.tar.gz?sig=abc",
            Path::new("/var/cache/artifetch"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/var/cache/artifetch/custom.tar.gz"));
    }

    #[test]
    fn test_cached_name_cannot_escape_cache_dir() {
        for name in [
            "/etc/evil.tar.gz",
            "../evil.tar.gz",
            "nested/evil.tar.gz",
            "..",
            ".",
            "",
        ] {
            let source = ArtifactSource::new("app-*", "repo").with_cached_name(name);
            let err = cache_path(
                &source,
                "https://host/repo/app-1.2.3.tar.gz",
                Path::new("/var/cache/artifetch"),
            )
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidCachedName(_)),
                "accepted cached name {name:?}"
            );
        }
    }

    #[test]
    fn test_default_cache_dir() {
        assert!(default_cache_dir().ends_with("artifetch"));
    }
}
