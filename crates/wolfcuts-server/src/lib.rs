//! Process wiring for the Wolf Cuts survey server.
//!
//! Mounts the JSON API under `/api` and serves the pre-built front-end bundle
//! for every other path, falling back to `index.html` so client-side routes
//! resolve.

use std::path::{Path, PathBuf};

use axum::Router;
use serde::Deserialize;
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};
use wolfcuts_api::ApiState;
use wolfcuts_core::{coupon::Coupon, store::SurveyStore};

// ─── Configuration ────────────────────────────────────────────────────────────

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: i64 = 3000;
const DEFAULT_STORE_PATH: &str = "sukarnoppos.db";
const DEFAULT_STATIC_DIR: &str = "dist";

/// Runtime server configuration, deserialised from `config.toml` and
/// `WOLFCUTS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Directory holding the built front-end; `index.html` doubles as the
  /// fallback page.
  pub static_dir:       PathBuf,
  /// Reject submissions with blank required fields instead of storing them.
  #[serde(default)]
  pub require_complete: bool,
  #[serde(default)]
  pub coupon:           Coupon,
}

impl ServerConfig {
  /// Layer the optional file at `path` and the environment over the
  /// built-in defaults.
  ///
  /// Nested keys use a double underscore in the environment, e.g.
  /// `WOLFCUTS_COUPON__CODE`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", DEFAULT_PORT)?
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .set_default("static_dir", DEFAULT_STATIC_DIR)?
      .set_default("require_complete", false)?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("WOLFCUTS")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: `/api/*` plus static files from `static_dir`.
pub fn router<S>(api: ApiState<S>, static_dir: &Path) -> Router
where
  S: SurveyStore + 'static,
{
  let index = static_dir.join("index.html");
  let assets = ServeDir::new(static_dir).fallback(ServeFile::new(index));

  Router::new()
    .nest("/api", wolfcuts_api::api_router(api))
    .fallback_service(assets)
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt as _;
  use wolfcuts_core::memory::MemoryStore;

  /// A throwaway directory, removed on drop.
  struct TempDir(PathBuf);

  impl TempDir {
    fn new(name: &str) -> Self {
      let dir = std::env::temp_dir()
        .join(format!("wolfcuts-server-{name}-{}", std::process::id()));
      let _ = std::fs::remove_dir_all(&dir);
      std::fs::create_dir_all(&dir).unwrap();
      Self(dir)
    }
  }

  impl Drop for TempDir {
    fn drop(&mut self) { let _ = std::fs::remove_dir_all(&self.0); }
  }

  fn bundle(name: &str) -> TempDir {
    let dir = TempDir::new(name);
    std::fs::write(dir.0.join("index.html"), "<html>wizard</html>").unwrap();
    std::fs::create_dir_all(dir.0.join("assets")).unwrap();
    std::fs::write(dir.0.join("assets/app.js"), "console.log('carne')").unwrap();
    dir
  }

  async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
  }

  fn app(static_dir: &Path) -> Router {
    router(ApiState::new(Arc::new(MemoryStore::new())), static_dir)
  }

  #[tokio::test]
  async fn serves_static_assets() {
    let dir = bundle("assets");
    let (status, body) = get(app(&dir.0), "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('carne')");
  }

  #[tokio::test]
  async fn unknown_paths_fall_back_to_index() {
    let dir = bundle("spa");
    let (status, body) = get(app(&dir.0), "/gracias").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>wizard</html>");
  }

  #[tokio::test]
  async fn api_is_nested() {
    let dir = bundle("api");
    let (status, body) = get(app(&dir.0), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, serde_json::json!({ "total": 0, "segments": [] }));
  }

  #[tokio::test]
  async fn api_submit_through_full_app() {
    let dir = bundle("submit");
    let resp = app(&dir.0)
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/survey")
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from(r#"{"customer":{"averageSpend":"under200"}}"#))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[test]
  fn defaults_without_config_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/wolfcuts.toml")).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("sukarnoppos.db"));
    assert_eq!(cfg.static_dir, PathBuf::from("dist"));
    assert!(!cfg.require_complete);
    assert_eq!(cfg.coupon, Coupon::default());
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = TempDir::new("config");
    let path = dir.0.join("config.toml");
    std::fs::write(
      &path,
      "port = 8080\nrequire_complete = true\n\n[coupon]\ncode = \"ASADO10\"\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "0.0.0.0");
    assert!(cfg.require_complete);
    assert_eq!(cfg.coupon.code, "ASADO10");
    assert_eq!(cfg.coupon.discount, 50);
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }

  #[test]
  fn tilde_expansion() {
    let expanded = expand_tilde(Path::new("~/surveys.db"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expanded, PathBuf::from(home).join("surveys.db"));
    }
    assert_eq!(expand_tilde(Path::new("/var/db")), PathBuf::from("/var/db"));
  }
}
