//! Handler for `POST /upload` — multipart CSV ingest.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/upload` | multipart field `file`; responds with the ingest report |

use axum::{
  Json,
  extract::{Multipart, State},
};
use serde::Serialize;
use tally_core::{forecast::Forecaster, store::SalesStore};
use tally_csv::RowError;

use crate::{ApiState, error::ApiError};

/// The aggregated ingest report for one uploaded file.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub message:  String,
  /// Rows the store actually inserted.
  pub inserted: usize,
  /// Rows that failed validation, with line numbers and reasons.
  pub rejected: Vec<RowError>,
}

/// `POST /upload` — exactly one `file` field per call.
///
/// Accepted rows are inserted in a single atomic batch; rejected rows are
/// reported per line. A missing file field or an unparseable stream is a
/// 400, a store failure a 500.
pub async fn upload<S, F>(
  State(state): State<ApiState<S, F>>,
  mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  // Bound concurrent ingests; uploads beyond the limit wait here. The
  // semaphore is never closed, so acquire cannot fail in practice.
  let _permit = state
    .upload_permits
    .acquire()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut file = None;
  while let Some(field) = multipart.next_field().await.map_err(|e| {
    ApiError::BadRequest(format!("malformed multipart body: {e}"))
  })? {
    if field.name() == Some("file") {
      let data = field.bytes().await.map_err(|e| {
        ApiError::BadRequest(format!("failed to read upload: {e}"))
      })?;
      file = Some(data);
      break;
    }
  }

  let Some(data) = file else {
    return Err(ApiError::BadRequest("no file uploaded".to_string()));
  };

  let batch = tally_csv::parse_batch(&data)
    .map_err(|e| ApiError::BadRequest(format!("invalid csv: {e}")))?;

  let inserted = state
    .store
    .insert_records(batch.records)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(inserted, rejected = batch.rejected.len(), "csv ingest");

  Ok(Json(UploadResponse {
    message:  "upload complete".to_string(),
    inserted,
    rejected: batch.rejected,
  }))
}
