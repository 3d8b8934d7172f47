//! Async HTTP client wrapping the tally JSON API.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tally_core::{
  forecast::Forecast,
  outlier::OutlierPoint,
  record::{CategoryTotal, SalesRecord},
};

/// Connection settings for the tally API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

// ─── Response shapes ─────────────────────────────────────────────────────────

/// Response of `POST /api/upload`.
#[derive(Debug, Deserialize)]
pub struct UploadReport {
  pub message:  String,
  pub inserted: usize,
  #[serde(default)]
  pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Deserialize)]
pub struct RejectedRow {
  pub line:   u64,
  pub column: String,
  pub reason: String,
}

/// Response of `PUT /api/update` and `DELETE /api/delete`.
#[derive(Debug, Deserialize)]
pub struct MutationReport {
  pub message:  String,
  pub affected: u64,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the tally JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /api/data[?start=...&end=...]`
  pub async fn list_records(
    &self,
    range: Option<(NaiveDate, NaiveDate)>,
  ) -> Result<Vec<SalesRecord>> {
    let mut req = self.client.get(self.url("/data"));
    if let Some((start, end)) = range {
      req = req.query(&[
        ("start", start.to_string()),
        ("end", end.to_string()),
      ]);
    }

    let resp = req.send().await.context("GET /data failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /data → {}", resp.status()));
    }
    resp.json().await.context("deserialising records")
  }

  /// `GET /api/data-with-outliers`
  pub async fn outliers(&self) -> Result<Vec<OutlierPoint>> {
    let resp = self
      .client
      .get(self.url("/data-with-outliers"))
      .send()
      .await
      .context("GET /data-with-outliers failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /data-with-outliers → {}", resp.status()));
    }
    resp.json().await.context("deserialising outlier series")
  }

  /// `GET /api/predict`
  pub async fn predict(&self) -> Result<Forecast> {
    let resp = self
      .client
      .get(self.url("/predict"))
      .send()
      .await
      .context("GET /predict failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /predict → {}", resp.status()));
    }
    resp.json().await.context("deserialising forecast")
  }

  /// `GET /api/category-summary`
  pub async fn category_summary(&self) -> Result<Vec<CategoryTotal>> {
    let resp = self
      .client
      .get(self.url("/category-summary"))
      .send()
      .await
      .context("GET /category-summary failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /category-summary → {}", resp.status()));
    }
    resp.json().await.context("deserialising category summary")
  }

  /// `GET /api/search?name=<substring>`
  pub async fn search(&self, name: &str) -> Result<Vec<SalesRecord>> {
    let resp = self
      .client
      .get(self.url("/search"))
      .query(&[("name", name)])
      .send()
      .await
      .context("GET /search failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /search → {}", resp.status()));
    }
    resp.json().await.context("deserialising search results")
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /api/upload` — multipart CSV upload.
  pub async fn upload_csv(&self, path: &Path) -> Result<UploadReport> {
    let bytes = tokio::fs::read(path)
      .await
      .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload.csv".to_string());

    let part = reqwest::multipart::Part::bytes(bytes)
      .file_name(file_name)
      .mime_str("text/csv")
      .context("building multipart part")?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = self
      .client
      .post(self.url("/upload"))
      .multipart(form)
      .send()
      .await
      .context("POST /upload failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("POST /upload → {}", resp.status()));
    }
    resp.json().await.context("deserialising upload report")
  }

  /// `PUT /api/update`
  pub async fn update_amount(
    &self,
    name: &str,
    amount: f64,
  ) -> Result<MutationReport> {
    let resp = self
      .client
      .put(self.url("/update"))
      .json(&serde_json::json!({ "name": name, "amount": amount }))
      .send()
      .await
      .context("PUT /update failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("PUT /update → {}", resp.status()));
    }
    resp.json().await.context("deserialising update report")
  }

  /// `DELETE /api/delete`
  pub async fn delete(&self, name: &str) -> Result<MutationReport> {
    let resp = self
      .client
      .delete(self.url("/delete"))
      .json(&serde_json::json!({ "name": name }))
      .send()
      .await
      .context("DELETE /delete failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("DELETE /delete → {}", resp.status()));
    }
    resp.json().await.context("deserialising delete report")
  }
}
