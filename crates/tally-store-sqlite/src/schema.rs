//! SQL schema for the tally SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per product sale. Rows have no identity of their own: search,
-- update, and delete all key on the name column.
CREATE TABLE IF NOT EXISTS products (
    name     TEXT    NOT NULL,
    quantity INTEGER NOT NULL,  -- non-negative
    amount   REAL    NOT NULL,  -- currency value, unit unspecified
    date     TEXT    NOT NULL   -- ISO 8601 calendar date (YYYY-MM-DD)
);

CREATE INDEX IF NOT EXISTS products_date_idx ON products(date);
CREATE INDEX IF NOT EXISTS products_name_idx ON products(name);

PRAGMA user_version = 1;
";
