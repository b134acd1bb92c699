//! `wolfcuts`: terminal client for the SuKarNeppo'S survey server.
//!
//! # Usage
//!
//! ```
//! wolfcuts take                       # fill in the survey
//! wolfcuts --url http://tienda:3000 stats
//! wolfcuts --config ~/.config/wolfcuts/config.toml take
//! ```

mod app;
mod client;
mod prompt;

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use prompt::Prompter;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wolfcuts_core::wizard::{Step, Wizard};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "wolfcuts", about = "Terminal client for the SuKarNeppo'S survey")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the survey server (default: http://localhost:3000).
  #[arg(long, env = "WOLFCUTS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Answer the survey and receive the coupon.
  Take,
  /// Show how many surveys were recorded, per segment.
  Stats,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Take => take(&client).await,
    Command::Stats => stats(&client).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn take(client: &ApiClient) -> Result<()> {
  let stdin = io::stdin();
  let mut p = Prompter::new(stdin.lock(), io::stdout());
  let mut wizard = Wizard::new();

  loop {
    // Prompts block on stdin; keep them off the async worker.
    tokio::task::block_in_place(|| app::collect(&mut wizard, &mut p))?;

    let reply = loop {
      match client.submit(wizard.form()).await {
        Ok(reply) => break reply,
        Err(e) => {
          tracing::warn!(error = %e, "survey submission failed");
          p.say(&format!("No pudimos guardar tus respuestas: {e:#}"))?;
          if !tokio::task::block_in_place(|| p.confirm("¿Reintentar?"))? {
            return Ok(());
          }
        }
      }
    };

    wizard.advance_to(Step::Final)?;
    app::show_reward(&mut p, reply.segment, &reply.coupon)?;

    if !tokio::task::block_in_place(|| p.confirm("\n¿Volver al inicio?"))? {
      return Ok(());
    }
    wizard.advance_to(Step::Welcome)?;
  }
}

async fn stats(client: &ApiClient) -> Result<()> {
  let stats = client.stats().await?;
  println!("total: {}", stats.total);
  for s in &stats.segments {
    println!("  {:<8} {}", s.segment.to_string(), s.count);
  }
  Ok(())
}
