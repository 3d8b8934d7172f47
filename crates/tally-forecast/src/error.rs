//! Error type for `tally-forecast`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The external program could not be spawned or its output collected.
  #[error("failed to run forecast program: {0}")]
  Io(#[from] std::io::Error),

  /// The external program exited non-zero.
  #[error("forecast program exited with code {code:?}")]
  Execution {
    code:   Option<i32>,
    stderr: String,
  },

  /// Stdout was not the expected JSON forecast document.
  #[error("forecast output is not valid JSON: {0}")]
  Parse(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
