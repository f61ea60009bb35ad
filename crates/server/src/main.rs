mod api;
mod chunk;
mod cli;
mod router;
mod state;
mod templating;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tokchunk_core::Config;

use crate::cli::{Cli, Command};
use crate::state::AppState;

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    tokchunk_core::config::load_dotenv();
    let mut config = Config::from_env();
    cli.apply(&mut config);
    config.validate().context("invalid chunking configuration")?;
    Ok(config)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(config)?);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Serve { .. } => serve(config).await?,
        Command::Chunk { pdf, print, .. } => {
            chunk::run(&config, &pdf, print)?;
        }
    }

    Ok(())
}
