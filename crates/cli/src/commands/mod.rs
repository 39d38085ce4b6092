pub mod resolve;
pub mod version;

use std::path::PathBuf;
use std::time::Duration;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `key: value` lines
    Text,
    /// A single JSON object
    Json,
}

/// Inputs of the `resolve` command after argument parsing.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub pattern: Option<String>,
    pub repository: Option<String>,
    pub path: Option<String>,
    pub source_file: Option<PathBuf>,
    pub url: Option<String>,
    pub sha1: Option<String>,
    pub cached_name: Option<String>,
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub authorization: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub enum Command {
    Version,
    Resolve(Box<ResolveOptions>),
}
