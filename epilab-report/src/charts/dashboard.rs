//! Composite dashboard: global lines, top-N bars, the CFR line, and a text
//! summary panel.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::{chart_err, draw_bar_panel, draw_line_panel, format_count};
use crate::theme::Theme;
use epilab_core::domain::{GlobalPoint, Metric, MetricTable};
use epilab_core::summary::{case_fatality_series, metric_series, top_countries};

pub(crate) fn render(
    path: &Path,
    tables: &[MetricTable],
    summary: &[GlobalPoint],
    top_n: usize,
    theme: &Theme,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1800, 1200)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled("Global Dashboard", ("sans-serif", 32))
        .map_err(chart_err)?;

    let cells = root.split_evenly((3, 2));

    let confirmed = metric_series(summary, Metric::Confirmed);
    if !confirmed.is_empty() {
        draw_line_panel(
            &cells[0],
            "Global Confirmed Cases Over Time",
            &confirmed,
            theme.color(0),
            theme,
        )?;
    }

    let deaths = metric_series(summary, Metric::Deaths);
    if !deaths.is_empty() {
        draw_line_panel(
            &cells[1],
            "Global Deaths Over Time",
            &deaths,
            theme.color(1),
            theme,
        )?;
    }

    if let Some(table) = table_for(tables, Metric::Confirmed) {
        let ranked = top_countries(table, top_n, None);
        draw_bar_panel(
            &cells[2],
            &format!("Top {} Countries by Total Cases", ranked.len()),
            &ranked,
            theme,
        )?;
    }

    if let Some(table) = table_for(tables, Metric::Deaths) {
        let ranked = top_countries(table, top_n, None);
        draw_bar_panel(
            &cells[3],
            &format!("Top {} Countries by Total Deaths", ranked.len()),
            &ranked,
            theme,
        )?;
    }

    let cfr = case_fatality_series(summary);
    if !cfr.is_empty() {
        draw_line_panel(
            &cells[4],
            "Global Case Fatality Rate Over Time",
            &cfr,
            theme.color(3),
            theme,
        )?;
    }

    draw_summary_panel(&cells[5], tables, summary)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn table_for(tables: &[MetricTable], metric: Metric) -> Option<&MetricTable> {
    tables.iter().find(|t| t.metric == metric)
}

/// Headline numbers as plain text: totals, CFR, country count, as-of date.
fn draw_summary_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    tables: &[MetricTable],
    summary: &[GlobalPoint],
) -> Result<()> {
    let confirmed = metric_series(summary, Metric::Confirmed);
    let deaths = metric_series(summary, Metric::Deaths);

    let mut lines: Vec<String> = vec!["Global Summary".to_string(), String::new()];

    if let Some(&(_, total_cases)) = confirmed.last() {
        lines.push(format!("Total confirmed cases: {}", format_count(total_cases)));
    }
    if let Some(&(_, total_deaths)) = deaths.last() {
        lines.push(format!("Total deaths: {}", format_count(total_deaths)));
    }
    if let (Some(&(_, cases)), Some(&(_, dead))) = (confirmed.last(), deaths.last()) {
        if cases > 0.0 {
            lines.push(format!("Case fatality rate: {:.2}%", dead / cases * 100.0));
        }
    }
    if let Some(table) = table_for(tables, Metric::Confirmed) {
        lines.push(format!("Countries reporting: {}", table.countries().len()));
    }
    if let Some(&(date, _)) = confirmed.last() {
        lines.push(format!("Data as of: {date}"));
    }

    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 {
            ("sans-serif", 24).into_font()
        } else {
            ("sans-serif", 18).into_font()
        };
        area.draw(&Text::new(line.clone(), (60, 60 + 30 * i as i32), style))
            .map_err(chart_err)?;
    }

    Ok(())
}
