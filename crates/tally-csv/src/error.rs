//! Error type for `tally-csv`.

use thiserror::Error;

/// A batch-level parse failure. Row-level problems are not errors; they are
/// collected as [`RowError`](crate::RowError)s and parsing continues.
#[derive(Debug, Error)]
pub enum Error {
  /// The header row is missing a required column.
  #[error("missing required column {0:?}")]
  MissingColumn(&'static str),

  /// The byte stream could not be read as CSV at all (ragged row, invalid
  /// UTF-8, unterminated quote).
  #[error("malformed csv stream: {0}")]
  Stream(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
