//! CSV batch parsing for tally sales uploads.
//!
//! Turns delimited text with a header row into
//! [`SalesRecord`](tally_core::record::SalesRecord)s, validating every field
//! per row. Bad rows are collected with their line numbers instead of being
//! silently coerced; a malformed stream is a typed error, never a crash.

mod parse;

pub mod error;

pub use error::{Error, Result};
pub use parse::{ParsedBatch, RowError, parse_batch};
