//! habits-server binary.
//!
//! Reads `habits.toml` (or the path given with `--config`), opens the SQLite
//! store named by `DATABASE_URL` and serves the habit API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use habits_server::ServerConfig;
use habits_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Habit tracker HTTP server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "habits.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, std::env::var("DATABASE_URL").ok())
    .context("failed to load configuration")?;

  let store = SqliteStore::connect(&server_cfg.database_url)
    .await
    .with_context(|| format!("failed to open database {:?}", server_cfg.database_url))?;
  tracing::info!(database = %server_cfg.database_url, "connected to database");

  let app = habits_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
