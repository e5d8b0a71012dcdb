//! Top-N country rankings.
//!
//! Snapshot per country at an explicit date, or at each country's own latest
//! date when none is given. The sort is stable, so ties keep input order.

use crate::domain::{MetricTable, RankedCountry};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Default ranking size.
pub const DEFAULT_TOP_N: usize = 10;

/// The n largest countries by snapshot value, descending.
///
/// Rows with non-finite values are excluded so the ordering stays total.
/// Fewer than n countries returns all of them.
pub fn top_countries(table: &MetricTable, n: usize, at: Option<NaiveDate>) -> Vec<RankedCountry> {
    let snapshot: Vec<&crate::domain::DerivedRecord> = match at {
        Some(date) => table.rows.iter().filter(|r| r.date == date).collect(),
        None => table.latest_per_country(),
    };

    let mut ranked: Vec<RankedCountry> = snapshot
        .into_iter()
        .filter(|r| r.value.is_finite())
        .map(|r| RankedCountry {
            country: r.country.clone(),
            value: r.value,
            date: r.date,
        })
        .collect();

    ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DerivedRecord, Metric};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 2, d).unwrap()
    }

    fn table(rows: &[(&str, u32, f64)]) -> MetricTable {
        MetricTable {
            metric: Metric::Confirmed,
            rows: rows
                .iter()
                .map(|&(country, d, value)| DerivedRecord {
                    country: country.to_string(),
                    date: day(d),
                    value,
                    daily_new: 0.0,
                    avg7: value,
                })
                .collect(),
        }
    }

    #[test]
    fn ranks_by_each_countrys_own_latest_date() {
        // Borduria's series ends a day earlier than Aland's.
        let t = table(&[
            ("Aland", 1, 10.0),
            ("Aland", 2, 30.0),
            ("Borduria", 1, 50.0),
        ]);

        let ranked = top_countries(&t, 10, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].country, "Borduria");
        assert_eq!(ranked[0].date, day(1));
        assert_eq!(ranked[1].country, "Aland");
        assert_eq!(ranked[1].date, day(2));
    }

    #[test]
    fn explicit_date_snapshots_that_date_only() {
        let t = table(&[
            ("Aland", 1, 10.0),
            ("Aland", 2, 30.0),
            ("Borduria", 1, 50.0),
        ]);

        let ranked = top_countries(&t, 10, Some(day(1)));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].country, "Borduria");
        assert_eq!(ranked[0].value, 50.0);
        assert_eq!(ranked[1].value, 10.0);
    }

    #[test]
    fn never_returns_more_than_n_and_sorts_descending() {
        let t = table(&[
            ("A", 1, 3.0),
            ("B", 1, 9.0),
            ("C", 1, 1.0),
            ("D", 1, 7.0),
        ]);

        let ranked = top_countries(&t, 2, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].country, "B");
        assert_eq!(ranked[1].country, "D");
    }

    #[test]
    fn ties_keep_input_order() {
        let t = table(&[("A", 1, 5.0), ("B", 1, 5.0), ("C", 1, 5.0)]);

        let ranked = top_countries(&t, 3, None);
        let names: Vec<&str> = ranked.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn fewer_countries_than_n_returns_all() {
        let t = table(&[("A", 1, 5.0), ("B", 1, 3.0)]);
        assert_eq!(top_countries(&t, 10, None).len(), 2);
    }
}
