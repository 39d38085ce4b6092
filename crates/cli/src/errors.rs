//! CLI error reporting with miette diagnostics

use artifetch_artifactory::Error as ResolveError;
use miette::Diagnostic;
use thiserror::Error;

/// CLI-specific error types with diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Artifactory is not configured")]
    #[diagnostic(
        code(artifetch::cli::configuration),
        help(
            "Pass --endpoint and --authorization, or set ARTIFACTORY_ENDPOINT, \
             ARTIFACTORY_USERNAME and ARTIFACTORY_PASSWORD"
        )
    )]
    Configuration {
        #[source]
        source: ResolveError,
    },

    #[error("Artifact not found")]
    #[diagnostic(
        code(artifetch::cli::not_found),
        help("Check the pattern, the repository and the --path prefix")
    )]
    NotFound {
        #[source]
        source: ResolveError,
    },

    #[error("Artifact resolution failed")]
    #[diagnostic(code(artifetch::cli::resolution_failed))]
    ResolutionFailed {
        #[source]
        source: ResolveError,
    },

    #[error("Failed to read source description {}", .path.display())]
    #[diagnostic(
        code(artifetch::cli::invalid_source),
        help("The file must be a JSON object with at least `pattern` and `repository`")
    )]
    InvalidSource {
        path: std::path::PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Missing argument {argument}")]
    #[diagnostic(
        code(artifetch::cli::missing_argument),
        help("Run 'artifetch resolve --help' to see available options")
    )]
    MissingArgument { argument: String },

    #[error("Failed to write output")]
    #[diagnostic(code(artifetch::cli::output))]
    Output {
        #[source]
        source: serde_json::Error,
    },
}

impl From<ResolveError> for CliError {
    fn from(source: ResolveError) -> Self {
        match source {
            ResolveError::Configuration(_) => Self::Configuration { source },
            ResolveError::NotFound { .. } => Self::NotFound { source },
            _ => Self::ResolutionFailed { source },
        }
    }
}

impl CliError {
    pub fn invalid_source(
        path: impl Into<std::path::PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidSource {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn missing_argument(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }
}

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;
