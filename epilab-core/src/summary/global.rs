//! Global per-date summaries across all countries.

use crate::domain::{GlobalPoint, Metric, MetricTable};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sum each metric across all countries per date, tagged with its metric.
///
/// Output is date-ordered within each metric, metrics concatenated in table
/// order.
pub fn global_summary(tables: &[MetricTable]) -> Vec<GlobalPoint> {
    let mut out = Vec::new();
    for table in tables {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for row in &table.rows {
            *by_date.entry(row.date).or_insert(0.0) += row.value;
        }
        out.extend(by_date.into_iter().map(|(date, value)| GlobalPoint {
            date,
            metric: table.metric,
            value,
        }));
    }
    out
}

/// Extract one metric's date-ordered series from the summary.
pub fn metric_series(points: &[GlobalPoint], metric: Metric) -> Vec<(NaiveDate, f64)> {
    points
        .iter()
        .filter(|p| p.metric == metric)
        .map(|p| (p.date, p.value))
        .collect()
}

/// Case fatality rate series: deaths / confirmed × 100 per date.
///
/// Dates with zero confirmed cases are dropped from the series; the ratio is
/// undefined there, not an error.
pub fn case_fatality_series(points: &[GlobalPoint]) -> Vec<(NaiveDate, f64)> {
    let confirmed: BTreeMap<NaiveDate, f64> = points
        .iter()
        .filter(|p| p.metric == Metric::Confirmed)
        .map(|p| (p.date, p.value))
        .collect();

    let mut out = Vec::new();
    for point in points.iter().filter(|p| p.metric == Metric::Deaths) {
        let Some(&conf) = confirmed.get(&point.date) else {
            continue;
        };
        if conf == 0.0 {
            continue;
        }
        out.push((point.date, point.value / conf * 100.0));
    }
    out
}
