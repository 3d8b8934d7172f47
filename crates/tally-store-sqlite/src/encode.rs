//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings so that lexicographic
//! comparison in SQL (`ORDER BY date`, `BETWEEN`) matches calendar order.

use chrono::NaiveDate;
use tally_core::record::SalesRecord;

use crate::{Error, Result};

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Raw values read directly from a `products` row.
pub struct RawRecord {
  pub name:     String,
  pub quantity: i64,
  pub amount:   f64,
  pub date:     String,
}

impl RawRecord {
  pub fn into_record(self) -> Result<SalesRecord> {
    let quantity = u32::try_from(self.quantity)
      .map_err(|_| Error::QuantityRange(self.quantity))?;
    Ok(SalesRecord {
      name: self.name,
      quantity,
      amount: self.amount,
      date: decode_date(&self.date)?,
    })
  }
}
