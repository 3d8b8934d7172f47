//! The `SalesStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tally-store-sqlite`).
//! Higher layers (`tally-api`, `tally-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::record::{AmountPoint, CategoryTotal, DateRange, SalesRecord};

/// Abstraction over a tally sales-store backend.
///
/// Reads are side-effect-free. The only mutators are [`update_amount`] and
/// [`delete_by_name`], both keyed on exact `name` equality; concurrent
/// conflicting mutations on the same name are unordered (last writer wins
/// at the store layer).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// [`update_amount`]: SalesStore::update_amount
/// [`delete_by_name`]: SalesStore::delete_by_name
pub trait SalesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Bulk-insert `records` atomically: a concurrent reader observes all of
  /// them or none. Returns the number of rows inserted.
  fn insert_records(
    &self,
    records: Vec<SalesRecord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Overwrite `amount` on every row whose `name` matches exactly.
  /// Returns the affected-row count.
  fn update_amount<'a>(
    &'a self,
    name: &'a str,
    amount: f64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Delete every row whose `name` matches exactly. Returns the
  /// affected-row count; deleting an absent name reports 0.
  fn delete_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All rows in ascending date order, optionally restricted to an
  /// inclusive date range. No pagination — full-scan semantics.
  fn list_records(
    &self,
    range: Option<DateRange>,
  ) -> impl Future<Output = Result<Vec<SalesRecord>, Self::Error>> + Send + '_;

  /// The full `(date, amount)` series in ascending date order — the input
  /// to outlier derivation.
  fn amount_series(
    &self,
  ) -> impl Future<Output = Result<Vec<AmountPoint>, Self::Error>> + Send + '_;

  /// `amount` summed per distinct `name`, ordered by name.
  fn category_summary(
    &self,
  ) -> impl Future<Output = Result<Vec<CategoryTotal>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match on `name`.
  fn search_by_name<'a>(
    &'a self,
    needle: &'a str,
  ) -> impl Future<Output = Result<Vec<SalesRecord>, Self::Error>> + Send + 'a;
}
