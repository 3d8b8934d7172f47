//! Error type for `tally-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// A stored quantity does not fit the domain type. Cannot happen through
  /// the ingest path, which validates quantities as `u32`.
  #[error("quantity out of range: {0}")]
  QuantityRange(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
