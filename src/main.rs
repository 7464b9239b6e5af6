use anyhow::Result;
use clap::Parser;
use job_hunter::cli::{handle_command, Cli};
use job_hunter::{logging, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = cli.backend.as_deref() {
        config = config.with_backend_url(url);
    }

    logging::init(&config)?;

    info!("Environment: {}", config.environment);
    info!("Backend: {}", config.backend_url);

    handle_command(cli, config).await
}
