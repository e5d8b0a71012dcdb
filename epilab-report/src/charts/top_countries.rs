//! Top-N countries for one metric: bar panel plus top-5 trend lines.

use anyhow::Result;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

use super::{chart_err, draw_bar_panel, draw_multi_line_panel};
use crate::theme::Theme;
use epilab_core::domain::MetricTable;
use epilab_core::summary::top_countries;

pub(crate) fn render(path: &Path, table: &MetricTable, n: usize, theme: &Theme) -> Result<()> {
    let ranked = top_countries(table, n, None);
    anyhow::ensure!(!ranked.is_empty(), "no countries to rank");

    let root = BitMapBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let halves = root.split_evenly((1, 2));

    let metric_title = title_case(table.metric.as_str());
    draw_bar_panel(
        &halves[0],
        &format!("Top {} Countries: {metric_title}", ranked.len()),
        &ranked,
        theme,
    )?;

    let trend_series: Vec<(String, Vec<(NaiveDate, f64)>)> = ranked
        .iter()
        .take(5)
        .map(|r| {
            let series = table
                .series_for(&r.country)
                .iter()
                .map(|d| (d.date, d.value))
                .collect();
            (r.country.clone(), series)
        })
        .collect();

    draw_multi_line_panel(
        &halves[1],
        &format!("{metric_title} Trends: Top 5 Countries"),
        &trend_series,
        theme,
    )?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
