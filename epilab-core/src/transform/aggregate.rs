//! Collapse sub-national rows to one observation per (country, date).

use crate::domain::CountryDay;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group by (country, date) and sum values.
///
/// Output is sorted by (country, date) and has at most one row per key, so
/// the total per country is preserved while province rows collapse.
pub fn sum_by_country_date(records: Vec<CountryDay>) -> Vec<CountryDay> {
    let mut grouped: BTreeMap<(String, NaiveDate), f64> = BTreeMap::new();
    for record in records {
        *grouped.entry((record.country, record.date)).or_insert(0.0) += record.value;
    }

    grouped
        .into_iter()
        .map(|((country, date), value)| CountryDay {
            country,
            date,
            value,
        })
        .collect()
}
