//! Process-level defaults for Artifactory access.
//!
//! Defaults are read once, when the configuration is built, and then passed
//! to the resolver explicitly. Per-source values always take precedence.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the default server base URL.
pub const ENDPOINT_ENV: &str = "ARTIFACTORY_ENDPOINT";
/// Environment variable holding the default Basic auth username.
pub const USERNAME_ENV: &str = "ARTIFACTORY_USERNAME";
/// Environment variable holding the default Basic auth password.
pub const PASSWORD_ENV: &str = "ARTIFACTORY_PASSWORD";

/// Default endpoint and credentials used when a source omits them.
#[derive(Debug, Clone, Default)]
pub struct ArtifactoryConfig {
    endpoint: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
}

impl ArtifactoryConfig {
    /// Create an empty configuration (no defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read defaults from `ARTIFACTORY_ENDPOINT`, `ARTIFACTORY_USERNAME`
    /// and `ARTIFACTORY_PASSWORD`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read defaults through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            endpoint: read(ENDPOINT_ENV),
            username: read(USERNAME_ENV),
            password: read(PASSWORD_ENV).map(SecretString::from),
        }
    }

    /// Set the default endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the default Basic auth username and password.
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set only the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set only the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// The default endpoint, if configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// The default username and password, when both are configured.
    #[must_use]
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password.expose_secret())),
            _ => None,
        }
    }
}
