//! hearth-server binary entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hearth_core::AppConfig;

/// REST API for the hearth rental marketplace
#[derive(Parser, Debug)]
#[command(name = "hearth-server", version, about)]
struct Args {
    /// Override the bind address (otherwise HEARTH_BIND_ADDR or default)
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,

    /// Allow any CORS origin (development only)
    #[arg(long)]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    tracing::info!(bind_addr = %config.bind_addr, "starting hearth-server");

    hearth_server::serve(config, args.cors_permissive).await
}
