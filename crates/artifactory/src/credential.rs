//! Authorization header values for Artifactory requests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

/// An opaque `Authorization` header value.
///
/// Wraps `secrecy::SecretString` so the value is zeroed on drop and never
/// shows up in `Debug` or `Display` output.
#[derive(Clone)]
pub struct Credential {
    inner: SecretString,
}

impl Credential {
    /// Wrap an existing header value (e.g. `Bearer ...` or `Basic ...`).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: SecretString::from(value.into()),
        }
    }

    /// Build a Basic credential: `Basic base64(username:password)`.
    #[must_use]
    pub fn basic(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Self::new(format!("Basic {encoded}"))
    }

    /// Expose the header value.
    ///
    /// Only pass the result to the HTTP layer; never log it.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_credential() {
        let credential = Credential::basic("u", "p");
        assert_eq!(credential.expose(), "Basic dTpw");
    }

    #[test]
    fn test_basic_credential_no_line_breaks() {
        let long = "x".repeat(120);
        let credential = Credential::basic("deployer", &long);
        assert!(credential.expose().starts_with("Basic "));
        assert!(!credential.expose().contains('\n'));
    }

    #[test]
    fn test_credential_redacted() {
        let credential = Credential::new("Bearer secret-token");
        assert_eq!(format!("{credential:?}"), "[REDACTED]");
        assert_eq!(credential.to_string(), "[REDACTED]");
        assert_eq!(credential.expose(), "Bearer secret-token");
    }

    #[test]
    fn test_credential_deserialize() {
        let credential: Credential = serde_json::from_str("\"Basic abc\"").unwrap();
        assert_eq!(credential, Credential::new("Basic abc"));
    }
}
