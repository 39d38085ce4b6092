//! Shared fixtures for unit tests.

use async_trait::async_trait;
use chrono::DateTime;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Result;
use crate::index::{ArtifactIndex, ArtifactRecord, Checksums, SearchQuery};

pub const ENDPOINT: &str = "https://artifactory.example.com/artifactory";

/// In-memory index that returns canned records and counts calls.
#[derive(Debug, Default)]
pub struct StaticIndex {
    records: Vec<ArtifactRecord>,
    calls: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
}

impl StaticIndex {
    pub fn new(records: Vec<ArtifactRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ArtifactIndex for StaticIndex {
    async fn search(&self, query: &SearchQuery<'_>) -> Result<Vec<ArtifactRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_authorization.lock() {
            *guard = query.authorization.map(|c| c.expose().to_string());
        }
        Ok(self.records.clone())
    }
}

/// A record at `{ENDPOINT}/{path}` with the given sha1 and creation time.
pub fn record(path: &str, sha1: &str, created: &str) -> ArtifactRecord {
    ArtifactRecord {
        download_uri: format!("{ENDPOINT}/{path}"),
        checksums: Checksums {
            sha1: Some(sha1.to_string()),
            ..Checksums::default()
        },
        created: DateTime::parse_from_rfc3339(created).unwrap(),
        repo: None,
        path: None,
    }
}
