//! Handlers for the record listing and name-keyed endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/data` | Optional `?start=&end=` (inclusive; both or neither) |
//! | `GET` | `/search?name=` | Case-insensitive substring match; term required |
//! | `PUT` | `/update` | Body `{"name","amount"}`; exact-name match |
//! | `DELETE` | `/delete` | Body `{"name"}`; exact-name match |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_core::{
  forecast::Forecaster,
  record::{DateRange, SalesRecord},
  store::SalesStore,
};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub start: Option<NaiveDate>,
  pub end:   Option<NaiveDate>,
}

/// `GET /data[?start=YYYY-MM-DD&end=YYYY-MM-DD]`
///
/// A lone bound is rejected rather than silently ignored.
pub async fn list<S, F>(
  State(state): State<ApiState<S, F>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SalesRecord>>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  let range = match (params.start, params.end) {
    (None, None) => None,
    (Some(start), Some(end)) => Some(
      DateRange::new(start, end)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
    ),
    _ => {
      return Err(ApiError::BadRequest(
        "start and end must be provided together".to_string(),
      ));
    }
  };

  let records = state
    .store
    .list_records(range)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub name: Option<String>,
}

/// `GET /search?name=<substring>`
pub async fn search<S, F>(
  State(state): State<ApiState<S, F>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SalesRecord>>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  let needle = params.name.unwrap_or_default();
  if needle.trim().is_empty() {
    return Err(ApiError::BadRequest("search term is required".to_string()));
  }

  let records = state
    .store
    .search_by_name(&needle)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub name:   String,
  pub amount: f64,
}

/// Response shape shared by the mutating endpoints.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
  pub message:  String,
  pub affected: u64,
}

/// `PUT /update` — overwrites `amount` on every row matching `name`
/// exactly. An amount of zero is accepted.
pub async fn update<S, F>(
  State(state): State<ApiState<S, F>>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<MutationResponse>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".to_string()));
  }
  if !body.amount.is_finite() || body.amount < 0.0 {
    return Err(ApiError::BadRequest(
      "amount must be a finite non-negative number".to_string(),
    ));
  }

  let affected = state
    .store
    .update_amount(&body.name, body.amount)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(MutationResponse {
    message: "update complete".to_string(),
    affected,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub name: String,
}

/// `DELETE /delete` — removes every row matching `name` exactly.
pub async fn delete<S, F>(
  State(state): State<ApiState<S, F>>,
  Json(body): Json<DeleteBody>,
) -> Result<Json<MutationResponse>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".to_string()));
  }

  let affected = state
    .store
    .delete_by_name(&body.name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(MutationResponse {
    message: "delete complete".to_string(),
    affected,
  }))
}
