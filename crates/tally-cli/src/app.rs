//! Dashboard state and key handling.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tally_core::{
  forecast::Forecast,
  outlier::OutlierPoint,
  record::{CategoryTotal, SalesRecord},
};

use crate::client::ApiClient;

/// Rows shown in the preview table before the full-table toggle.
pub const PREVIEW_ROWS: usize = 10;

// ─── Derived totals ──────────────────────────────────────────────────────────

/// Running totals derived from already-fetched rows; no extra API calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Totals {
  pub amount:     f64,
  pub quantity:   u64,
  /// Average unit price: total amount over total quantity.
  pub unit_price: f64,
}

impl Totals {
  fn from_records(records: &[SalesRecord]) -> Self {
    let amount: f64 = records.iter().map(|r| r.amount).sum();
    let quantity: u64 = records.iter().map(|r| u64::from(r.quantity)).sum();
    let unit_price = if quantity == 0 {
      0.0
    } else {
      amount / quantity as f64
    };
    Self {
      amount,
      quantity,
      unit_price,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level dashboard state.
pub struct App {
  /// All rows, date ascending.
  pub records: Vec<SalesRecord>,

  /// The amount series with derived outlier flags.
  pub outliers: Vec<OutlierPoint>,

  /// The external forecaster's series; empty when unavailable.
  pub forecast: Forecast,

  /// Per-category totals; empty when the endpoint is disabled server-side.
  pub summary: Vec<CategoryTotal>,

  /// Totals derived from `records`.
  pub totals: Totals,

  /// When `false`, the table shows only the first [`PREVIEW_ROWS`] rows.
  pub full_table: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: ApiClient,
}

impl App {
  /// Create an [`App`] with nothing loaded yet.
  pub fn new(client: ApiClient) -> Self {
    Self {
      records: Vec::new(),
      outliers: Vec::new(),
      forecast: Forecast::default(),
      summary: Vec::new(),
      totals: Totals::default(),
      full_table: false,
      status_msg: String::new(),
      client,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch every series the dashboard renders.
  pub async fn refresh(&mut self) -> Result<()> {
    self.status_msg = "Loading…".into();

    let records = self.client.list_records(None).await?;
    self.outliers = self.client.outliers().await?;

    // The summary endpoint may be feature-disabled server-side.
    self.summary = self.client.category_summary().await.unwrap_or_default();

    // A dashboard without a forecast is still a dashboard; don't fail the
    // whole refresh when the external forecaster is down.
    match self.client.predict().await {
      Ok(forecast) => {
        self.forecast = forecast;
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("forecast unavailable: {e}"),
    }

    self.totals = Totals::from_records(&records);
    self.records = records;
    Ok(())
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('r') => {
        if let Err(e) = self.refresh().await {
          self.status_msg = format!("Error: {e}");
        }
      }
      KeyCode::Char('f') => self.full_table = !self.full_table,
      _ => {}
    }
    Ok(true)
  }
}
