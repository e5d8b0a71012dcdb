//! Epilab Core — dataset registry, fetcher, snapshot store, loader, transforms, summaries.
//!
//! This crate contains everything up to (but not including) chart rendering:
//! - Domain types (long-format observations, derived tables, rankings)
//! - The fixed registry of remote snapshot datasets
//! - Sequential HTTP fetcher with per-dataset failure tolerance
//! - Verbatim snapshot store with integrity sidecars
//! - CSV loaders for the wide and long snapshot formats
//! - Tabular transforms (melt, aggregate, daily delta, trailing mean)
//! - Cross-country summaries (global totals, top-N rankings, correlations)

pub mod data;
pub mod domain;
pub mod summary;
pub mod transform;
