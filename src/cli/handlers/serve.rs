//! Serve command handler

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or with `dry_run` only validates and reports the
    /// effective configuration.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        // the URL can hold credentials, so only the database name is shown
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database: {}", self.config.database.database);
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
