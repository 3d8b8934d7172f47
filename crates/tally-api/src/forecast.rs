//! Handler for `GET /predict` — the forecast bridge.

use axum::{Json, extract::State};
use tally_core::{
  forecast::{Forecast, Forecaster},
  store::SalesStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /predict` — relays the forecaster's series verbatim.
pub async fn predict<S, F>(
  State(state): State<ApiState<S, F>>,
) -> Result<Json<Forecast>, ApiError>
where
  S: SalesStore,
  F: Forecaster,
{
  let forecast = state
    .forecaster
    .forecast()
    .await
    .map_err(|e| ApiError::Forecast(Box::new(e)))?;
  Ok(Json(forecast))
}
