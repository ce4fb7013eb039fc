use clap::Parser;
use user_backend::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(version = user_backend::clap_long_version(), "Build information");

    cli::execute_command(&cli, settings).await
}
