//! Ewe web server - PubMed relay and research service.

use anyhow::{Context, Result};
use clap::Parser;
use ewe_core::config::Settings;
use ewe_web::{create_router, AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ewe-web")]
#[command(about = "Ewe web server - PubMed relay and research service")]
struct Cli {
    /// Address to listen on (overrides EWE_BIND_ADDR and ewe.toml)
    #[arg(short, long)]
    bind: Option<String>,

    /// Settings file (default: ewe.toml in this or a parent directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            let mut settings = Settings::from_file(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            settings.apply_env(|key| std::env::var(key).ok())?;
            settings
        }
        None => Settings::load().context("failed to load settings")?,
    };
    if let Some(bind) = cli.bind {
        settings.server.bind_addr = bind;
    }

    let state = AppState::from_settings(&settings)?;
    let app = create_router(state);

    let addr = settings.server.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, eutils = %settings.literature.eutils_base_url, "ewe-web listening");
    axum::serve(listener, app).await?;

    Ok(())
}
