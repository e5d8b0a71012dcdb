//! Tidy per-country-per-day records and their derived forms.
//!
//! A wide snapshot melts into `CountryDay` observations; aggregation collapses
//! sub-national rows so (country, date) is unique; derivation adds the daily
//! delta and the trailing mean. Values are cumulative counts unless noted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three cumulative series published in the wide snapshots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Confirmed,
    Deaths,
    Recovered,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Deaths, Metric::Recovered];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Deaths => "deaths",
            Metric::Recovered => "recovered",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One long-format observation: a country's cumulative count on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDay {
    pub country: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// A `CountryDay` enriched with the derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub country: String,
    pub date: NaiveDate,
    /// Cumulative count as reported.
    pub value: f64,
    /// Day-over-day increase, clamped from below at zero. First point is 0.
    pub daily_new: f64,
    /// Trailing mean of `value` (prefix mean before the window fills).
    pub avg7: f64,
}

/// A fully derived table for one metric.
///
/// Rows are sorted by (country, date); each country's rows are contiguous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTable {
    pub metric: Metric,
    pub rows: Vec<DerivedRecord>,
}

impl MetricTable {
    /// Distinct countries, in table order.
    pub fn countries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if out.last().map_or(true, |c| *c != row.country) {
                out.push(&row.country);
            }
        }
        out
    }

    /// All rows for one country, in date order.
    pub fn series_for(&self, country: &str) -> Vec<&DerivedRecord> {
        self.rows.iter().filter(|r| r.country == country).collect()
    }

    /// Each country's row at its own latest date, in table order.
    pub fn latest_per_country(&self) -> Vec<&DerivedRecord> {
        let mut out: Vec<&DerivedRecord> = Vec::new();
        for row in &self.rows {
            match out.last_mut() {
                Some(last) if last.country == row.country => {
                    if row.date >= last.date {
                        *last = row;
                    }
                }
                _ => out.push(row),
            }
        }
        out
    }

    /// The latest date present anywhere in the table.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }
}

/// One row of the cross-country summary: all countries summed for a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPoint {
    pub date: NaiveDate,
    pub metric: Metric,
    pub value: f64,
}

/// One row of a top-N ranking: a country's snapshot value and its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCountry {
    pub country: String,
    pub value: f64,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    fn row(country: &str, day: u32, value: f64) -> DerivedRecord {
        DerivedRecord {
            country: country.to_string(),
            date: date(day),
            value,
            daily_new: 0.0,
            avg7: value,
        }
    }

    #[test]
    fn countries_deduplicates_contiguous_runs() {
        let table = MetricTable {
            metric: Metric::Confirmed,
            rows: vec![row("Aland", 1, 1.0), row("Aland", 2, 2.0), row("Borduria", 1, 3.0)],
        };
        assert_eq!(table.countries(), vec!["Aland", "Borduria"]);
    }

    #[test]
    fn latest_per_country_takes_each_countrys_last_date() {
        let table = MetricTable {
            metric: Metric::Confirmed,
            rows: vec![
                row("Aland", 1, 1.0),
                row("Aland", 3, 5.0),
                row("Borduria", 1, 2.0),
                row("Borduria", 2, 4.0),
            ],
        };
        let latest = table.latest_per_country();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].date, date(3));
        assert_eq!(latest[0].value, 5.0);
        assert_eq!(latest[1].date, date(2));
        assert_eq!(latest[1].value, 4.0);
    }

    #[test]
    fn latest_date_spans_all_countries() {
        let table = MetricTable {
            metric: Metric::Deaths,
            rows: vec![row("Aland", 4, 1.0), row("Borduria", 9, 2.0)],
        };
        assert_eq!(table.latest_date(), Some(date(9)));
    }
}
