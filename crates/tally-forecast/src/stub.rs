//! In-process stub [`Forecaster`].

use std::convert::Infallible;

use tally_core::forecast::{Forecast, Forecaster};

/// Serves a fixed forecast series. Used by tests and offline demos; never
/// fails.
#[derive(Debug, Clone, Default)]
pub struct StaticForecaster {
  forecast: Forecast,
}

impl StaticForecaster {
  pub fn new(forecast: Forecast) -> Self { Self { forecast } }
}

impl Forecaster for StaticForecaster {
  type Error = Infallible;

  async fn forecast(&self) -> Result<Forecast, Infallible> {
    Ok(self.forecast.clone())
  }
}
