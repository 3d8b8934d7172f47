//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use tally_core::{
  record::{DateRange, SalesRecord},
  store::SalesStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(s: &str) -> NaiveDate { s.parse().unwrap() }

fn rec(name: &str, quantity: u32, amount: f64, date: &str) -> SalesRecord {
  SalesRecord {
    name: name.to_string(),
    quantity,
    amount,
    date: d(date),
  }
}

// ─── Insert / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_roundtrip_sorted_by_date() {
  let s = store().await;

  let inserted = s
    .insert_records(vec![
      rec("Widget", 2, 10.0, "2024-01-03"),
      rec("Gadget", 1, 5.0, "2024-01-01"),
      rec("Widget", 4, 20.0, "2024-01-02"),
    ])
    .await
    .unwrap();
  assert_eq!(inserted, 3);

  let rows = s.list_records(None).await.unwrap();
  assert_eq!(rows.len(), 3);
  // Ascending date order regardless of insert order.
  assert_eq!(rows[0], rec("Gadget", 1, 5.0, "2024-01-01"));
  assert_eq!(rows[1], rec("Widget", 4, 20.0, "2024-01-02"));
  assert_eq!(rows[2], rec("Widget", 2, 10.0, "2024-01-03"));
}

#[tokio::test]
async fn insert_empty_batch_returns_zero() {
  let s = store().await;
  assert_eq!(s.insert_records(Vec::new()).await.unwrap(), 0);
  assert!(s.list_records(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_rows_are_kept() {
  // Rows have no identity; identical sales are distinct rows.
  let s = store().await;
  let row = rec("Widget", 1, 10.0, "2024-01-01");
  s.insert_records(vec![row.clone(), row.clone()]).await.unwrap();
  assert_eq!(s.list_records(None).await.unwrap().len(), 2);
}

// ─── Date-range filter ───────────────────────────────────────────────────────

#[tokio::test]
async fn date_range_filter_is_inclusive_on_both_bounds() {
  let s = store().await;
  s.insert_records(vec![
    rec("A", 1, 1.0, "2023-12-31"),
    rec("B", 1, 1.0, "2024-01-01"),
    rec("C", 1, 1.0, "2024-01-15"),
    rec("D", 1, 1.0, "2024-01-31"),
    rec("E", 1, 1.0, "2024-02-01"),
  ])
  .await
  .unwrap();

  let range = DateRange::new(d("2024-01-01"), d("2024-01-31")).unwrap();
  let rows = s.list_records(Some(range)).await.unwrap();

  let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["B", "C", "D"]);
}

#[tokio::test]
async fn date_range_with_no_matches_is_empty() {
  let s = store().await;
  s.insert_records(vec![rec("A", 1, 1.0, "2024-06-01")])
    .await
    .unwrap();

  let range = DateRange::new(d("2024-01-01"), d("2024-01-31")).unwrap();
  assert!(s.list_records(Some(range)).await.unwrap().is_empty());
}

// ─── Amount series ───────────────────────────────────────────────────────────

#[tokio::test]
async fn amount_series_is_date_ascending() {
  let s = store().await;
  s.insert_records(vec![
    rec("A", 1, 30.0, "2024-01-03"),
    rec("B", 1, 10.0, "2024-01-01"),
    rec("C", 1, 20.0, "2024-01-02"),
  ])
  .await
  .unwrap();

  let series = s.amount_series().await.unwrap();
  let amounts: Vec<_> = series.iter().map(|p| p.amount).collect();
  assert_eq!(amounts, [10.0, 20.0, 30.0]);
}

// ─── Category summary ────────────────────────────────────────────────────────

#[tokio::test]
async fn category_summary_sums_amounts_per_name() {
  let s = store().await;
  s.insert_records(vec![
    rec("Widget", 2, 10.0, "2024-01-01"),
    rec("Widget", 1, 15.5, "2024-01-02"),
    rec("Gadget", 1, 100.0, "2024-01-03"),
  ])
  .await
  .unwrap();

  let summary = s.category_summary().await.unwrap();
  assert_eq!(summary.len(), 2);
  // Ordered by category name.
  assert_eq!(summary[0].category, "Gadget");
  assert_eq!(summary[0].total, 100.0);
  assert_eq!(summary[1].category, "Widget");
  assert_eq!(summary[1].total, 25.5);
}

#[tokio::test]
async fn category_summary_of_empty_store_is_empty() {
  let s = store().await;
  assert!(s.category_summary().await.unwrap().is_empty());
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_is_case_insensitive_substring_match() {
  let s = store().await;
  s.insert_records(vec![
    rec("Widget", 1, 10.0, "2024-01-01"),
    rec("widget pro", 1, 20.0, "2024-01-02"),
    rec("Gadget", 1, 30.0, "2024-01-03"),
  ])
  .await
  .unwrap();

  let hits = s.search_by_name("wid").await.unwrap();
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|r| r.name.to_lowercase().contains("wid")));
}

#[tokio::test]
async fn search_with_no_matches_is_empty() {
  let s = store().await;
  s.insert_records(vec![rec("Widget", 1, 10.0, "2024-01-01")])
    .await
    .unwrap();
  assert!(s.search_by_name("doodad").await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_amount_affects_every_exact_name_match() {
  let s = store().await;
  s.insert_records(vec![
    rec("Widget", 1, 10.0, "2024-01-01"),
    rec("Widget", 2, 20.0, "2024-01-02"),
    rec("Gadget", 1, 30.0, "2024-01-03"),
  ])
  .await
  .unwrap();

  let affected = s.update_amount("Widget", 99.5).await.unwrap();
  assert_eq!(affected, 2);

  let rows = s.list_records(None).await.unwrap();
  for row in rows {
    if row.name == "Widget" {
      assert_eq!(row.amount, 99.5);
    } else {
      assert_eq!(row.amount, 30.0);
    }
  }
}

#[tokio::test]
async fn update_amount_zero_is_accepted() {
  let s = store().await;
  s.insert_records(vec![rec("Widget", 1, 10.0, "2024-01-01")])
    .await
    .unwrap();

  let affected = s.update_amount("Widget", 0.0).await.unwrap();
  assert_eq!(affected, 1);
  assert_eq!(s.list_records(None).await.unwrap()[0].amount, 0.0);
}

#[tokio::test]
async fn update_amount_is_exact_match_not_substring() {
  let s = store().await;
  s.insert_records(vec![
    rec("Widget", 1, 10.0, "2024-01-01"),
    rec("Widget pro", 1, 20.0, "2024-01-02"),
  ])
  .await
  .unwrap();

  let affected = s.update_amount("Widget", 5.0).await.unwrap();
  assert_eq!(affected, 1);
}

#[tokio::test]
async fn update_amount_unknown_name_affects_zero() {
  let s = store().await;
  assert_eq!(s.update_amount("Nothing", 1.0).await.unwrap(), 0);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_by_name_reports_count_then_zero() {
  let s = store().await;
  s.insert_records(vec![
    rec("Widget", 1, 10.0, "2024-01-01"),
    rec("Widget", 2, 20.0, "2024-01-02"),
    rec("Gadget", 1, 30.0, "2024-01-03"),
  ])
  .await
  .unwrap();

  assert_eq!(s.delete_by_name("Widget").await.unwrap(), 2);
  assert_eq!(s.delete_by_name("Widget").await.unwrap(), 0);

  let rows = s.list_records(None).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].name, "Gadget");
}
