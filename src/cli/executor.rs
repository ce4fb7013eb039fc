//! Dispatches parsed CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Runs the selected command with merged settings. No subcommand means
/// `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    warn_on_privileged_port(&settings);

    let dry_run = matches!(cli.command, Some(Commands::Serve { dry_run: true, .. }));
    ServeCommandHandler::new(settings).execute(dry_run).await
}

fn warn_on_privileged_port(settings: &Settings) {
    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 typically requires elevated privileges"
        );
    }
}
