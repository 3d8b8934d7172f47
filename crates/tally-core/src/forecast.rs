//! The `Forecaster` capability and forecast series types.
//!
//! Forecasting itself is an external black box; implementations only relay
//! its output. See `tally-forecast` for the process-backed implementation
//! and the in-process stub.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One predicted point in a forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
  pub date:      NaiveDate,
  pub predicted: f64,
}

/// A forecast series, relayed to callers exactly as produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
  pub forecast: Vec<ForecastPoint>,
}

/// Abstraction over a forecast producer.
///
/// Implementations take no input: a process-backed forecaster reads the
/// store out of band, on its own schedule.
pub trait Forecaster: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn forecast(
    &self,
  ) -> impl Future<Output = Result<Forecast, Self::Error>> + Send + '_;
}
