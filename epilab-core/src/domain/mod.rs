//! Domain types for per-country pandemic time series.

pub mod owid;
pub mod record;

pub use owid::{OwidRow, CORRELATION_COLUMNS};
pub use record::{CountryDay, DerivedRecord, GlobalPoint, Metric, MetricTable, RankedCountry};
