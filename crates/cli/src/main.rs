mod cli;
mod commands;
mod errors;
mod tracing;

use crate::cli::parse;
use crate::commands::Command;
use crate::tracing::TracingConfig;
use ::tracing::instrument;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = parse();

    crate::tracing::init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..Default::default()
    })?;

    execute_command(cli.command.into()).await
}

#[instrument(skip(command))]
#[allow(clippy::print_stdout)]
async fn execute_command(command: Command) -> miette::Result<()> {
    let output = match command {
        Command::Version => commands::version::get_version_info(),
        Command::Resolve(options) => commands::resolve::execute_resolve(&options).await?,
    };

    println!("{output}");

    Ok(())
}
