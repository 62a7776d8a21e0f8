//! Persistent per-folder progress ledger (SQLite via sqlx).
//!
//! One row per folder key: the last-observed item total and the set of
//! processed row ids. Every write replaces the whole record, so an
//! interrupted run never leaves a partially-updated ledger.

mod db;
mod records;
pub mod types;

pub use db::ProgressDb;
pub use types::*;

#[cfg(test)]
pub(crate) use db::open_memory;
