//! Tabular transforms: reshape, aggregate, derive.
//!
//! The pipeline is melt → aggregate → derive, all pure functions over owned
//! record vectors. `derive_metric_table` is the assembly point that turns one
//! metric's aggregated observations into a fully derived table.

pub mod aggregate;
pub mod delta;
pub mod melt;
pub mod rolling;

pub use aggregate::sum_by_country_date;
pub use delta::daily_delta;
pub use melt::{melt_wide, TransformError, COUNTRY_COLUMN, WIDE_DATE_FORMAT, WIDE_ID_COLUMNS};
pub use rolling::trailing_mean;

use crate::domain::{CountryDay, DerivedRecord, Metric, MetricTable};

/// Default trailing-mean window, in days.
pub const DEFAULT_MA_WINDOW: usize = 7;

/// Derive the full per-metric table from aggregated observations.
///
/// `records` must already be aggregated to one row per (country, date); this
/// sorts by (country, date) and derives `daily_new` and the trailing mean
/// over each country's date-ordered series.
pub fn derive_metric_table(
    metric: Metric,
    mut records: Vec<CountryDay>,
    window: usize,
) -> MetricTable {
    records.sort_by(|a, b| (a.country.as_str(), a.date).cmp(&(b.country.as_str(), b.date)));

    let mut rows: Vec<DerivedRecord> = Vec::with_capacity(records.len());
    let mut start = 0;
    while start < records.len() {
        let mut end = start;
        while end < records.len() && records[end].country == records[start].country {
            end += 1;
        }

        let values: Vec<f64> = records[start..end].iter().map(|r| r.value).collect();
        let deltas = daily_delta(&values);
        let means = trailing_mean(&values, window);

        for (i, rec) in records[start..end].iter().enumerate() {
            rows.push(DerivedRecord {
                country: rec.country.clone(),
                date: rec.date,
                value: rec.value,
                daily_new: deltas[i],
                avg7: means[i],
            });
        }

        start = end;
    }

    MetricTable { metric, rows }
}

/// Build a date-ordered series of observations for one country, for tests.
#[cfg(test)]
pub fn make_series(country: &str, values: &[f64]) -> Vec<CountryDay> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| CountryDay {
            country: country.to_string(),
            date: base_date + chrono::Duration::days(i as i64),
            value,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for transform tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_groups_per_country_even_from_shuffled_input() {
        let mut records = make_series("Borduria", &[5.0, 10.0, 15.0]);
        records.extend(make_series("Aland", &[1.0, 2.0, 3.0]));
        // Interleave so the sort has work to do
        records.swap(0, 4);

        let table = derive_metric_table(Metric::Confirmed, records, DEFAULT_MA_WINDOW);

        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.countries(), vec!["Aland", "Borduria"]);

        let aland: Vec<f64> = table.series_for("Aland").iter().map(|r| r.daily_new).collect();
        assert_eq!(aland, vec![0.0, 1.0, 1.0]);
        let borduria: Vec<f64> = table
            .series_for("Borduria")
            .iter()
            .map(|r| r.daily_new)
            .collect();
        assert_eq!(borduria, vec![0.0, 5.0, 5.0]);
    }

    #[test]
    fn derive_applies_prefix_means_per_country() {
        let records = make_series("Aland", &[2.0, 4.0, 6.0]);
        let table = derive_metric_table(Metric::Deaths, records, 7);

        let means: Vec<f64> = table.rows.iter().map(|r| r.avg7).collect();
        assert_approx(means[0], 2.0, DEFAULT_EPSILON);
        assert_approx(means[1], 3.0, DEFAULT_EPSILON);
        assert_approx(means[2], 4.0, DEFAULT_EPSILON);
    }
}
