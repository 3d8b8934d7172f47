//! Outlier derivation over an amount series.
//!
//! The flag is a static whole-dataset heuristic recomputed on every query: a
//! point flags when its amount exceeds 1.5× the series mean or falls below
//! mean ÷ 1.5. Not windowed, not a maintained statistic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::AmountPoint;

/// Ratio between the series mean and either flagging bound.
const SPREAD: f64 = 1.5;

/// An [`AmountPoint`] with its derived outlier flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierPoint {
  pub date:    NaiveDate,
  pub amount:  f64,
  pub outlier: bool,
}

/// Flag every point against the mean of the whole series.
///
/// An empty series yields an empty result, so the degenerate 0/0 mean is
/// never computed. With a zero mean the lower bound collapses to zero and
/// only strictly positive amounts flag, via the upper bound.
pub fn flag_outliers(series: &[AmountPoint]) -> Vec<OutlierPoint> {
  if series.is_empty() {
    return Vec::new();
  }

  let avg = series.iter().map(|p| p.amount).sum::<f64>() / series.len() as f64;
  let upper = avg * SPREAD;
  let lower = avg / SPREAD;

  series
    .iter()
    .map(|p| OutlierPoint {
      date:    p.date,
      amount:  p.amount,
      outlier: p.amount > upper || p.amount < lower,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn series(amounts: &[f64]) -> Vec<AmountPoint> {
    amounts
      .iter()
      .enumerate()
      .map(|(i, &amount)| AmountPoint {
        date: NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
        amount,
      })
      .collect()
  }

  #[test]
  fn empty_series_yields_empty_result() {
    assert!(flag_outliers(&[]).is_empty());
  }

  #[test]
  fn flags_against_whole_series_mean() {
    // mean = 40, upper = 60, lower = 26.67: every point flags.
    let flagged = flag_outliers(&series(&[10.0, 10.0, 100.0]));
    assert_eq!(flagged.len(), 3);
    assert!(flagged.iter().all(|p| p.outlier));
  }

  #[test]
  fn uniform_series_has_no_outliers() {
    let flagged = flag_outliers(&series(&[50.0, 50.0, 50.0, 50.0]));
    assert!(flagged.iter().all(|p| !p.outlier));
  }

  #[test]
  fn zero_mean_series_flags_nothing() {
    // Both bounds collapse to zero; 0 > 0 and 0 < 0 are both false.
    let flagged = flag_outliers(&series(&[0.0, 0.0, 0.0]));
    assert!(flagged.iter().all(|p| !p.outlier));
  }

  #[test]
  fn zero_mean_series_flags_positive_amounts_via_upper_bound() {
    let flagged = flag_outliers(&[
      AmountPoint {
        date:   NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        amount: -5.0,
      },
      AmountPoint {
        date:   NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        amount: 5.0,
      },
    ]);
    // mean = 0: the positive point exceeds the (zero) upper bound, the
    // negative one undercuts the (zero) lower bound.
    assert!(flagged.iter().all(|p| p.outlier));
  }

  #[test]
  fn preserves_input_order_and_values() {
    let input = series(&[10.0, 20.0, 30.0]);
    let flagged = flag_outliers(&input);
    for (raw, derived) in input.iter().zip(&flagged) {
      assert_eq!(raw.date, derived.date);
      assert_eq!(raw.amount, derived.amount);
    }
  }
}
