//! tally server — configuration and router assembly.
//!
//! The binary in `main.rs` reads configuration, opens the SQLite store,
//! builds the process-backed forecaster, and serves the JSON API.

use std::path::PathBuf;

use axum::Router;
use serde::Deserialize;
use tally_api::{ApiState, Features, api_router};
use tally_core::{forecast::Forecaster, store::SalesStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `tally.toml` layered
/// under `TALLY_*` environment variables. Every field has a default, so the
/// server starts with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Path of the SQLite database file.
  pub store_path: PathBuf,
  /// Program invoked by the forecast bridge.
  pub forecast_program: String,
  /// Arguments passed to the forecast program (typically the script path).
  pub forecast_args: Vec<String>,
  /// Upper bound on CSV ingests running at once; excess uploads queue.
  pub max_concurrent_uploads: usize,
  /// Endpoint toggles; everything is enabled by default.
  pub features: Features,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                   "127.0.0.1".to_string(),
      port:                   5000,
      store_path:             PathBuf::from("tally.db"),
      forecast_program:       "python3".to_string(),
      forecast_args:          vec!["predict.py".to_string()],
      max_concurrent_uploads: 4,
      features:               Features::default(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the JSON API nested under `/api`,
/// with request tracing.
pub fn router<S, F>(state: ApiState<S, F>) -> Router
where
  S: SalesStore + 'static,
  F: Forecaster + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}
