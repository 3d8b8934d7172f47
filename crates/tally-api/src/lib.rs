//! JSON REST API for tally.
//!
//! Exposes an axum [`Router`] backed by any
//! [`SalesStore`](tally_core::store::SalesStore) and
//! [`Forecaster`](tally_core::forecast::Forecaster). Transport concerns
//! (TLS, tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tally_api::api_router(state))
//! ```

pub mod analytics;
pub mod error;
pub mod forecast;
pub mod ingest;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use serde::Deserialize;
use tally_core::{forecast::Forecaster, store::SalesStore};
use tokio::sync::Semaphore;

pub use error::ApiError;

// ─── Features ────────────────────────────────────────────────────────────────

/// Toggles for the optional endpoints.
///
/// The always-on core is upload, list, outliers, and predict; each of the
/// rest can be disabled per deployment, in which case its route is simply
/// not mounted.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Features {
  pub category_summary: bool,
  pub search:           bool,
  pub update:           bool,
  pub delete:           bool,
}

impl Default for Features {
  fn default() -> Self {
    Self {
      category_summary: true,
      search:           true,
      update:           true,
      delete:           true,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
pub struct ApiState<S, F> {
  pub store:          Arc<S>,
  pub forecaster:     Arc<F>,
  /// Gates concurrent CSV ingests; uploads beyond the limit queue.
  pub upload_permits: Arc<Semaphore>,
  pub features:       Features,
}

impl<S, F> ApiState<S, F> {
  pub fn new(
    store: S,
    forecaster: F,
    max_concurrent_uploads: usize,
    features: Features,
  ) -> Self {
    Self {
      store:          Arc::new(store),
      forecaster:     Arc::new(forecaster),
      upload_permits: Arc::new(Semaphore::new(max_concurrent_uploads)),
      features,
    }
  }
}

// Manual impl: a derived Clone would needlessly require `S: Clone, F: Clone`.
impl<S, F> Clone for ApiState<S, F> {
  fn clone(&self) -> Self {
    Self {
      store:          Arc::clone(&self.store),
      forecaster:     Arc::clone(&self.forecaster),
      upload_permits: Arc::clone(&self.upload_permits),
      features:       self.features,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, F>(state: ApiState<S, F>) -> Router<()>
where
  S: SalesStore + 'static,
  F: Forecaster + 'static,
{
  let features = state.features;

  let mut router = Router::new()
    .route("/upload", post(ingest::upload::<S, F>))
    .route("/data", get(records::list::<S, F>))
    .route("/data-with-outliers", get(analytics::outliers::<S, F>))
    .route("/predict", get(forecast::predict::<S, F>));

  if features.category_summary {
    router = router
      .route("/category-summary", get(analytics::category_summary::<S, F>));
  }
  if features.search {
    router = router.route("/search", get(records::search::<S, F>));
  }
  if features.update {
    router = router.route("/update", put(records::update::<S, F>));
  }
  if features.delete {
    router = router.route("/delete", delete(records::delete::<S, F>));
  }

  router.with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
