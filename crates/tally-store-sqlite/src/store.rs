//! [`SqliteStore`] — the SQLite implementation of [`SalesStore`].

use std::path::Path;

use tally_core::{
  record::{AmountPoint, CategoryTotal, DateRange, SalesRecord},
  store::SalesStore,
};

use crate::{
  Error, Result,
  encode::{RawRecord, decode_date, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tally sales store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SalesStore impl ─────────────────────────────────────────────────────────

impl SalesStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_records(&self, records: Vec<SalesRecord>) -> Result<usize> {
    if records.is_empty() {
      return Ok(0);
    }

    let rows: Vec<(String, i64, f64, String)> = records
      .into_iter()
      .map(|r| (r.name, i64::from(r.quantity), r.amount, encode_date(r.date)))
      .collect();

    let inserted = self
      .conn
      .call(move |conn| {
        // One transaction per batch: readers see the whole batch or none
        // of it.
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO products (name, quantity, amount, date)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (name, quantity, amount, date) in &rows {
            inserted +=
              stmt.execute(rusqlite::params![name, quantity, amount, date])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  async fn update_amount(&self, name: &str, amount: f64) -> Result<u64> {
    let name = name.to_owned();

    let affected = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE products SET amount = ?1 WHERE name = ?2",
          rusqlite::params![amount, name],
        )?;
        Ok(changed as u64)
      })
      .await?;

    Ok(affected)
  }

  async fn delete_by_name(&self, name: &str) -> Result<u64> {
    let name = name.to_owned();

    let affected = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "DELETE FROM products WHERE name = ?1",
          rusqlite::params![name],
        )?;
        Ok(changed as u64)
      })
      .await?;

    Ok(affected)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_records(
    &self,
    range: Option<DateRange>,
  ) -> Result<Vec<SalesRecord>> {
    let bounds = range.map(|r| (encode_date(r.start()), encode_date(r.end())));

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let rows = if let Some((start, end)) = bounds {
          let mut stmt = conn.prepare(
            "SELECT name, quantity, amount, date FROM products
             WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC",
          )?;
          stmt
            .query_map(rusqlite::params![start, end], |row| {
              Ok(RawRecord {
                name:     row.get(0)?,
                quantity: row.get(1)?,
                amount:   row.get(2)?,
                date:     row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT name, quantity, amount, date FROM products
             ORDER BY date ASC",
          )?;
          stmt
            .query_map([], |row| {
              Ok(RawRecord {
                name:     row.get(0)?,
                quantity: row.get(1)?,
                amount:   row.get(2)?,
                date:     row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn amount_series(&self) -> Result<Vec<AmountPoint>> {
    let raws: Vec<(String, f64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT date, amount FROM products ORDER BY date ASC")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(date, amount)| {
        Ok(AmountPoint {
          date: decode_date(&date)?,
          amount,
        })
      })
      .collect()
  }

  async fn category_summary(&self) -> Result<Vec<CategoryTotal>> {
    let totals = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name, SUM(amount) FROM products
           GROUP BY name ORDER BY name ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(CategoryTotal {
              category: row.get(0)?,
              total:    row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(totals)
  }

  async fn search_by_name(&self, needle: &str) -> Result<Vec<SalesRecord>> {
    // SQLite LIKE is case-insensitive for ASCII.
    let pattern = format!("%{needle}%");

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT name, quantity, amount, date FROM products
           WHERE name LIKE ?1 ORDER BY date ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], |row| {
            Ok(RawRecord {
              name:     row.get(0)?,
              quantity: row.get(1)?,
              amount:   row.get(2)?,
              date:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}
