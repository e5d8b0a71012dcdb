//! Cross-country summaries: global totals, rankings, correlations.

pub mod correlation;
pub mod global;
pub mod ranking;

pub use correlation::{correlation_matrix, top_by_population, CorrelationMatrix};
pub use global::{case_fatality_series, global_summary, metric_series};
pub use ranking::{top_countries, DEFAULT_TOP_N};
