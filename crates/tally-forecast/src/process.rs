//! Subprocess-backed [`Forecaster`].

use tally_core::forecast::{Forecast, Forecaster};
use tokio::process::Command;

use crate::{Error, Result};

/// Runs an external forecasting program and relays its stdout JSON.
///
/// The program receives no input from tally; it is expected to read the
/// store out of band and print a single JSON document:
///
/// ```json
/// {"forecast":[{"date":"2024-02-01","predicted":123.0}]}
/// ```
///
/// There is no timeout and no retry: a slow forecaster simply holds its
/// request open.
#[derive(Debug, Clone)]
pub struct ProcessForecaster {
  program: String,
  args:    Vec<String>,
}

impl ProcessForecaster {
  pub fn new(
    program: impl Into<String>,
    args: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      program: program.into(),
      args:    args.into_iter().map(Into::into).collect(),
    }
  }
}

impl Forecaster for ProcessForecaster {
  type Error = Error;

  async fn forecast(&self) -> Result<Forecast> {
    let output = Command::new(&self.program)
      .args(&self.args)
      .output()
      .await?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
      return Err(Error::Execution {
        code:   output.status.code(),
        stderr: stderr.into_owned(),
      });
    }

    // Diagnostic chatter on stderr is logged but not fatal.
    if !stderr.trim().is_empty() {
      tracing::warn!(
        program = %self.program,
        "forecast stderr: {}",
        stderr.trim()
      );
    }

    Ok(serde_json::from_slice(&output.stdout)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sh(script: &str) -> ProcessForecaster {
    ProcessForecaster::new("sh", ["-c", script])
  }

  #[tokio::test]
  async fn relays_stdout_json_verbatim() {
    let f =
      sh(r#"echo '{"forecast":[{"date":"2024-02-01","predicted":123.0}]}'"#);
    let forecast = f.forecast().await.unwrap();

    assert_eq!(forecast.forecast.len(), 1);
    assert_eq!(forecast.forecast[0].date.to_string(), "2024-02-01");
    assert_eq!(forecast.forecast[0].predicted, 123.0);
  }

  #[tokio::test]
  async fn nonzero_exit_is_an_execution_error() {
    let f = sh("echo 'model blew up' >&2; exit 3");
    match f.forecast().await.unwrap_err() {
      Error::Execution { code, stderr } => {
        assert_eq!(code, Some(3));
        assert!(stderr.contains("model blew up"));
      }
      other => panic!("expected Execution, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn malformed_stdout_is_a_parse_error() {
    let f = sh("echo 'not json'");
    assert!(matches!(f.forecast().await.unwrap_err(), Error::Parse(_)));
  }

  #[tokio::test]
  async fn stderr_alone_is_not_fatal() {
    let f = sh(r#"echo 'warning: sparse data' >&2; echo '{"forecast":[]}'"#);
    let forecast = f.forecast().await.unwrap();
    assert!(forecast.forecast.is_empty());
  }

  #[tokio::test]
  async fn missing_program_is_an_io_error() {
    let f = ProcessForecaster::new("tally-no-such-program", Vec::<String>::new());
    assert!(matches!(f.forecast().await.unwrap_err(), Error::Io(_)));
  }
}
