use crate::commands::{Command, OutputFormat, ResolveOptions};
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artifetch")]
#[command(about = "Resolve build artifacts from Artifactory to a download URL, checksum and cache path")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Show version information")]
    Version,
    #[command(about = "Resolve an artifact and print its fetch request")]
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(help = "Artifact name pattern, e.g. 'app-*.tar.gz'")]
    pub pattern: Option<String>,

    #[arg(long, short = 'r', help = "Repository to search")]
    pub repository: Option<String>,

    #[arg(long, help = "Required path prefix below the repository root, e.g. /com/acme/")]
    pub path: Option<String>,

    #[arg(
        long,
        short = 's',
        help = "JSON file describing the source; flags override its fields",
        conflicts_with = "pattern"
    )]
    pub source: Option<PathBuf>,

    #[arg(long, help = "Known download URL; skips the search")]
    pub url: Option<String>,

    #[arg(long, help = "SHA-1 checksum accompanying --url", requires = "url")]
    pub sha1: Option<String>,

    #[arg(long, help = "Local file name for the cached download")]
    pub cached_name: Option<String>,

    #[arg(
        long,
        help = "Artifactory base URL; overrides the source and ARTIFACTORY_ENDPOINT"
    )]
    pub endpoint: Option<String>,

    #[arg(long, env = "ARTIFACTORY_USERNAME", help = "Basic auth username")]
    pub username: Option<String>,

    #[arg(
        long,
        env = "ARTIFACTORY_PASSWORD",
        hide_env_values = true,
        help = "Basic auth password"
    )]
    pub password: Option<String>,

    #[arg(long, help = "Authorization header value; replaces username and password")]
    pub authorization: Option<String>,

    #[arg(long, help = "Cache directory [default: user cache dir/artifetch]")]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, help = "Search timeout in seconds", default_value_t = 30)]
    pub timeout: u64,

    #[arg(long, help = "Output format", default_value = "text", value_enum)]
    pub format: OutputFormat,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Version => Command::Version,
            Commands::Resolve(args) => Command::Resolve(Box::new(ResolveOptions {
                pattern: args.pattern,
                repository: args.repository,
                path: args.path,
                source_file: args.source,
                url: args.url,
                sha1: args.sha1,
                cached_name: args.cached_name,
                endpoint: args.endpoint,
                username: args.username,
                password: args.password,
                authorization: args.authorization,
                cache_dir: args.cache_dir,
                timeout: std::time::Duration::from_secs(args.timeout),
                format: args.format,
            })),
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_args(args: &[&str]) -> ResolveArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Resolve(args) => args,
            Commands::Version => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["artifetch", "version"]).unwrap();

        assert_eq!(cli.level, LogLevel::Warn);
        assert_eq!(cli.log_format, TracingFormat::Compact);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_log_level_parsing() {
        let cli = Cli::try_parse_from(["artifetch", "--level", "debug", "version"]).unwrap();
        assert_eq!(cli.level, LogLevel::Debug);

        let cli = Cli::try_parse_from(["artifetch", "-l", "error", "version"]).unwrap();
        assert_eq!(cli.level, LogLevel::Error);

        assert!(Cli::try_parse_from(["artifetch", "--level", "invalid", "version"]).is_err());
    }

    #[test]
    fn test_resolve_arguments() {
        temp_env::with_vars_unset(
            ["ARTIFACTORY_USERNAME", "ARTIFACTORY_PASSWORD"],
            || {
                let args = resolve_args(&[
                    "artifetch",
                    "resolve",
                    "app-*.tar.gz",
                    "-r",
                    "libs-release",
                    "--path",
                    "/com/acme/",
                    "--cached-name",
                    "app.tar.gz",
                    "--format",
                    "json",
                ]);

                assert_eq!(args.pattern.as_deref(), Some("app-*.tar.gz"));
                assert_eq!(args.repository.as_deref(), Some("libs-release"));
                assert_eq!(args.path.as_deref(), Some("/com/acme/"));
                assert_eq!(args.cached_name.as_deref(), Some("app.tar.gz"));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.timeout, 30);
                assert!(args.endpoint.is_none());
                assert!(args.password.is_none());
            },
        );
    }

    #[test]
    fn test_resolve_reads_environment() {
        temp_env::with_vars(
            [
                ("ARTIFACTORY_ENDPOINT", Some("https://host/artifactory")),
                ("ARTIFACTORY_USERNAME", Some("deployer")),
                ("ARTIFACTORY_PASSWORD", Some("hunter2")),
            ],
            || {
                let args = resolve_args(&["artifetch", "resolve", "app-*", "-r", "libs"]);
                assert!(args.endpoint.is_none());
                assert_eq!(args.username.as_deref(), Some("deployer"));
                assert_eq!(args.password.as_deref(), Some("hunter2"));
            },
        );
    }

    #[test]
    fn test_sha1_requires_url() {
        let result = Cli::try_parse_from(["artifetch", "resolve", "app-*", "--sha1", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_conflicts_with_pattern() {
        let result = Cli::try_parse_from([
            "artifetch",
            "resolve",
            "app-*",
            "--source",
            "source.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_conversion() {
        let command: Command = Commands::Version.into();
        assert!(matches!(command, Command::Version));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["artifetch"]).is_err());
    }
}
