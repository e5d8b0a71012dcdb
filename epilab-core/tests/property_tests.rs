//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Daily deltas are never negative and always start at zero
//! 2. The trailing mean of a constant series is that constant
//! 3. Aggregation never grows the table and preserves per-country totals
//! 4. The global summary equals the per-country sums at every date
//! 5. Rankings are bounded by n and sorted descending

use chrono::NaiveDate;
use proptest::prelude::*;
use epilab_core::domain::{CountryDay, Metric};
use epilab_core::summary::{global_summary, top_countries};
use epilab_core::transform::{
    daily_delta, derive_metric_table, sum_by_country_date, trailing_mean,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1e9_f64, 1..60)
}

fn arb_records() -> impl Strategy<Value = Vec<CountryDay>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["Aland", "Borduria", "Syldavia"]),
            0u32..20,
            0.0..1e6_f64,
        ),
        1..80,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(country, day, value)| CountryDay {
                country: country.to_string(),
                date: base_date() + chrono::Duration::days(i64::from(day)),
                value,
            })
            .collect()
    })
}

// ── 1. Daily delta ───────────────────────────────────────────────────

proptest! {
    /// Deltas are never negative, and the first delta is always zero.
    #[test]
    fn daily_delta_is_nonnegative_and_starts_at_zero(values in arb_values()) {
        let deltas = daily_delta(&values);
        prop_assert_eq!(deltas.len(), values.len());
        prop_assert_eq!(deltas[0], 0.0);
        for delta in &deltas {
            prop_assert!(*delta >= 0.0);
        }
    }

    /// On a non-decreasing series the deltas sum back to the total increase.
    #[test]
    fn daily_delta_on_monotone_series_telescopes(mut values in arb_values()) {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let deltas = daily_delta(&values);
        let total: f64 = deltas.iter().sum();
        let increase = values.last().unwrap() - values.first().unwrap();
        prop_assert!((total - increase).abs() <= 1e-6 * (1.0 + increase));
    }
}

// ── 2. Trailing mean ─────────────────────────────────────────────────

proptest! {
    /// A constant series stays constant for every window size.
    #[test]
    fn trailing_mean_of_constant_series_is_the_constant(
        value in 0.0..1e9_f64,
        len in 1usize..60,
        window in 1usize..15,
    ) {
        let values = vec![value; len];
        let means = trailing_mean(&values, window);
        for mean in means {
            prop_assert!((mean - value).abs() <= 1e-6 * (1.0 + value));
        }
    }

    /// The mean never escapes the min/max envelope of its inputs.
    #[test]
    fn trailing_mean_stays_within_the_envelope(values in arb_values(), window in 1usize..15) {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for mean in trailing_mean(&values, window) {
            prop_assert!(mean >= min - 1e-6 && mean <= max + 1e-6);
        }
    }
}

// ── 3. Aggregation ───────────────────────────────────────────────────

proptest! {
    /// Aggregation never grows the table and preserves each country's total.
    #[test]
    fn aggregation_shrinks_and_preserves_totals(records in arb_records()) {
        let input_len = records.len();
        let mut input_totals: std::collections::BTreeMap<String, f64> =
            std::collections::BTreeMap::new();
        for r in &records {
            *input_totals.entry(r.country.clone()).or_insert(0.0) += r.value;
        }

        let aggregated = sum_by_country_date(records);
        prop_assert!(aggregated.len() <= input_len);

        let mut output_totals: std::collections::BTreeMap<String, f64> =
            std::collections::BTreeMap::new();
        for r in &aggregated {
            *output_totals.entry(r.country.clone()).or_insert(0.0) += r.value;
        }

        for (country, total) in &input_totals {
            let out = output_totals.get(country).copied().unwrap_or(0.0);
            prop_assert!((out - total).abs() <= 1e-3, "country {}: {} != {}", country, out, total);
        }
    }

    /// Aggregated keys are unique.
    #[test]
    fn aggregation_makes_country_date_unique(records in arb_records()) {
        let aggregated = sum_by_country_date(records);
        let mut keys: Vec<(String, NaiveDate)> = aggregated
            .iter()
            .map(|r| (r.country.clone(), r.date))
            .collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }
}

// ── 4. Global summary round trip ─────────────────────────────────────

proptest! {
    /// The summary at each date equals the sum of per-country values there.
    #[test]
    fn global_summary_round_trips_the_aggregation(records in arb_records()) {
        let table = derive_metric_table(Metric::Confirmed, sum_by_country_date(records), 7);
        let summary = global_summary(std::slice::from_ref(&table));

        for point in &summary {
            let expected: f64 = table
                .rows
                .iter()
                .filter(|r| r.date == point.date)
                .map(|r| r.value)
                .sum();
            prop_assert!((point.value - expected).abs() <= 1e-3);
        }
    }
}

// ── 5. Rankings ──────────────────────────────────────────────────────

proptest! {
    /// At most n rows, sorted descending; fewer countries returns them all.
    #[test]
    fn rankings_are_bounded_and_sorted(records in arb_records(), n in 1usize..6) {
        let table = derive_metric_table(Metric::Confirmed, sum_by_country_date(records), 7);
        let country_count = table.countries().len();

        let ranked = top_countries(&table, n, None);
        prop_assert!(ranked.len() <= n);
        prop_assert_eq!(ranked.len(), n.min(country_count));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }
    }
}
