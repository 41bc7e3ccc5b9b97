//! Main entry point for the `pomo` binary.

use anyhow::{Context, Result};
use clap::Parser;
use pomo_cli::{init_tracing, load_config, run, Cli};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?
        .get();
    init_tracing(&config.logging)?;
    debug!("Running {:?}", cli.command);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &config, &mut out).await {
        error!("Command failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
