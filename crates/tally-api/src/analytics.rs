//! Handlers for derived views: outlier flags and category totals.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/data-with-outliers` | Whole-series mean recomputed per call |
//! | `GET` | `/category-summary` | `SUM(amount)` grouped by name |

use axum::{Json, extract::State};
use tally_core::{
  forecast::Forecaster,
  outlier::{OutlierPoint, flag_outliers},
  record::CategoryTotal,
  store::SalesStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /data-with-outliers`
///
/// An empty store yields an empty array, never a division error.
pub async fn outliers<S, F>(
  State(state): State<ApiState<S, F>>,
) -> Result<Json<Vec<OutlierPoint>>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  let series = state
    .store
    .amount_series()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(flag_outliers(&series)))
}

/// `GET /category-summary`
pub async fn category_summary<S, F>(
  State(state): State<ApiState<S, F>>,
) -> Result<Json<Vec<CategoryTotal>>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  let summary = state
    .store
    .category_summary()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(summary))
}
