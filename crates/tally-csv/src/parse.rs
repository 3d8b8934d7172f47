//! CSV → [`SalesRecord`] batch parser.
//!
//! Pipeline:
//!   raw bytes
//!     └─ resolve_columns()  → header indices (case-insensitive)
//!          └─ parse_row()   → SalesRecord | RowError, per row
//!               └─ ParsedBatch { records, rejected }

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::record::SalesRecord;

use crate::error::{Error, Result};

// ─── Row errors ──────────────────────────────────────────────────────────────

/// A row that failed validation; reported back to the uploader in the
/// ingest report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
  /// 1-based line number in the uploaded file (the header is line 1).
  pub line:   u64,
  /// The column that failed validation.
  pub column: &'static str,
  pub reason: String,
}

/// The outcome of parsing one uploaded file.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
  /// Rows that passed validation, in file order.
  pub records:  Vec<SalesRecord>,
  /// Rows that failed validation, in file order.
  pub rejected: Vec<RowError>,
}

// ─── Header resolution ───────────────────────────────────────────────────────

struct Columns {
  name:     usize,
  quantity: usize,
  amount:   usize,
  date:     usize,
}

/// Match required headers case-insensitively; column order is free.
fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
  let find = |wanted: &'static str| {
    headers
      .iter()
      .position(|h| h.eq_ignore_ascii_case(wanted))
      .ok_or(Error::MissingColumn(wanted))
  };

  Ok(Columns {
    name:     find("name")?,
    quantity: find("quantity")?,
    amount:   find("amount")?,
    date:     find("date")?,
  })
}

// ─── Row parsing ─────────────────────────────────────────────────────────────

fn parse_row(
  columns: &Columns,
  record: &csv::StringRecord,
  line: u64,
) -> std::result::Result<SalesRecord, RowError> {
  let field = |idx: usize| record.get(idx).unwrap_or("");

  let name = field(columns.name);
  if name.is_empty() {
    return Err(RowError {
      line,
      column: "name",
      reason: "name is empty".to_string(),
    });
  }

  let quantity_raw = field(columns.quantity);
  let quantity: u32 = quantity_raw.parse().map_err(|_| RowError {
    line,
    column: "quantity",
    reason: format!("not a non-negative integer: {quantity_raw:?}"),
  })?;

  let amount_raw = field(columns.amount);
  let amount: f64 = amount_raw.parse().map_err(|_| RowError {
    line,
    column: "amount",
    reason: format!("not a number: {amount_raw:?}"),
  })?;
  if !amount.is_finite() || amount < 0.0 {
    return Err(RowError {
      line,
      column: "amount",
      reason: format!("not a finite non-negative amount: {amount_raw:?}"),
    });
  }

  let date_raw = field(columns.date);
  let date =
    NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| RowError {
      line,
      column: "date",
      reason: format!("not a YYYY-MM-DD date: {date_raw:?}"),
    })?;

  Ok(SalesRecord {
    name: name.to_string(),
    quantity,
    amount,
    date,
  })
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Parse one uploaded CSV file.
///
/// Returns a batch-level [`Error`] only when the stream itself is malformed
/// or a required column is missing from the header; individual bad rows land
/// in [`ParsedBatch::rejected`] and parsing continues.
pub fn parse_batch(input: &[u8]) -> Result<ParsedBatch> {
  let mut reader = csv::ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_reader(input);

  let columns = resolve_columns(reader.headers()?)?;

  let mut batch = ParsedBatch::default();
  for result in reader.records() {
    let record = result?;
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    match parse_row(&columns, &record, line) {
      Ok(record) => batch.records.push(record),
      Err(row_error) => batch.rejected.push(row_error),
    }
  }

  Ok(batch)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_well_formed_rows() {
    let input = b"name,quantity,amount,date\n\
                  Widget,2,10.5,2024-01-01\n\
                  Gadget,1,3,2024-01-02\n";
    let batch = parse_batch(input).unwrap();

    assert!(batch.rejected.is_empty());
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[0].name, "Widget");
    assert_eq!(batch.records[0].quantity, 2);
    assert_eq!(batch.records[0].amount, 10.5);
    assert_eq!(batch.records[0].date.to_string(), "2024-01-01");
  }

  #[test]
  fn headers_match_case_insensitively_in_any_order() {
    let input = b"Date,AMOUNT,Name,Quantity\n\
                  2024-03-05,7.25,Widget,4\n";
    let batch = parse_batch(input).unwrap();

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].name, "Widget");
    assert_eq!(batch.records[0].quantity, 4);
  }

  #[test]
  fn fields_are_trimmed() {
    let input = b"name,quantity,amount,date\n  Widget , 2 , 10 , 2024-01-01 \n";
    let batch = parse_batch(input).unwrap();

    assert_eq!(batch.records[0].name, "Widget");
    assert_eq!(batch.records[0].quantity, 2);
  }

  #[test]
  fn bad_rows_are_rejected_with_line_numbers() {
    let input = b"name,quantity,amount,date\n\
                  Widget,two,10,2024-01-01\n\
                  Gadget,1,ten,2024-01-02\n\
                  Doodad,1,10,yesterday\n\
                  ,1,10,2024-01-03\n\
                  Gizmo,3,5,2024-01-04\n";
    let batch = parse_batch(input).unwrap();

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].name, "Gizmo");

    assert_eq!(batch.rejected.len(), 4);
    assert_eq!(batch.rejected[0].line, 2);
    assert_eq!(batch.rejected[0].column, "quantity");
    assert_eq!(batch.rejected[1].column, "amount");
    assert_eq!(batch.rejected[2].column, "date");
    assert_eq!(batch.rejected[3].column, "name");
  }

  #[test]
  fn negative_values_are_rejected() {
    let input = b"name,quantity,amount,date\n\
                  Widget,-1,10,2024-01-01\n\
                  Widget,1,-10,2024-01-01\n";
    let batch = parse_batch(input).unwrap();

    assert!(batch.records.is_empty());
    assert_eq!(batch.rejected[0].column, "quantity");
    assert_eq!(batch.rejected[1].column, "amount");
  }

  #[test]
  fn missing_column_is_a_batch_error() {
    let input = b"name,quantity,date\nWidget,1,2024-01-01\n";
    let err = parse_batch(input).unwrap_err();
    assert!(matches!(err, Error::MissingColumn("amount")));
  }

  #[test]
  fn ragged_row_is_a_batch_error() {
    let input = b"name,quantity,amount,date\nWidget,1\n";
    let err = parse_batch(input).unwrap_err();
    assert!(matches!(err, Error::Stream(_)));
  }

  #[test]
  fn empty_file_with_header_parses_to_empty_batch() {
    let input = b"name,quantity,amount,date\n";
    let batch = parse_batch(input).unwrap();
    assert!(batch.records.is_empty());
    assert!(batch.rejected.is_empty());
  }
}
