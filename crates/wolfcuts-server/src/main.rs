//! wolfcuts-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite survey store, and serves the survey API plus the front-end bundle
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wolfcuts_api::ApiState;
use wolfcuts_core::intake::SurveyPolicy;
use wolfcuts_server::{ServerConfig, expand_tilde};
use wolfcuts_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "SuKarNeppo'S customer survey server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let static_dir = expand_tilde(&server_cfg.static_dir);

  // Open SQLite store; the schema is created on first use.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "survey store ready");

  if !static_dir.join("index.html").is_file() {
    tracing::warn!(dir = ?static_dir, "no index.html in static dir; only /api will be useful");
  }

  let state = ApiState {
    store:  Arc::new(store),
    policy: SurveyPolicy { require_complete: server_cfg.require_complete },
    coupon: Arc::new(server_cfg.coupon.clone()),
  };

  let app = wolfcuts_server::router(state, &static_dir);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
