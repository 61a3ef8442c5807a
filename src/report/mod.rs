//! Aggregation and output of per-run results.
//!
//! `summary` renders the console report; `writer` persists result tables.

pub mod summary;
pub mod writer;
