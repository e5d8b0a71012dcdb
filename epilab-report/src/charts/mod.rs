//! Chart artifacts.
//!
//! Each renderer is an independent, idempotent function from core outputs to
//! one PNG file. `ChartSet` owns the output directory and theme and hands out
//! the artifact paths; shared drawing helpers live here so the individual
//! charts stay declarative.

mod dashboard;
mod global_trends;
mod heatmap;
mod top_countries;
mod vaccination;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::theme::Theme;
use epilab_core::domain::{GlobalPoint, MetricTable, OwidRow, RankedCountry};
use epilab_core::summary::CorrelationMatrix;

/// Manages writing the fixed chart artifact set.
#[derive(Debug, Clone)]
pub struct ChartSet {
    plots_dir: PathBuf,
    theme: Theme,
    top_n: usize,
}

impl ChartSet {
    pub fn new(plots_dir: impl AsRef<Path>, theme: Theme, top_n: usize) -> Result<Self> {
        let plots_dir = plots_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&plots_dir).context("failed to create plots directory")?;
        Ok(Self {
            plots_dir,
            theme,
            top_n,
        })
    }

    pub fn plots_dir(&self) -> &Path {
        &self.plots_dir
    }

    /// Global cumulative trends plus the case fatality rate.
    pub fn render_global_trends(&self, summary: &[GlobalPoint]) -> Result<PathBuf> {
        let path = self.plots_dir.join("global_trends.png");
        global_trends::render(&path, summary, &self.theme)?;
        Ok(path)
    }

    /// Top-N bars and top-5 trend lines for one metric.
    pub fn render_top_countries(&self, table: &MetricTable) -> Result<PathBuf> {
        let path = self
            .plots_dir
            .join(format!("top_countries_{}.png", table.metric));
        top_countries::render(&path, table, self.top_n, &self.theme)?;
        Ok(path)
    }

    /// Composite dashboard across all loaded metrics.
    pub fn render_dashboard(
        &self,
        tables: &[MetricTable],
        summary: &[GlobalPoint],
    ) -> Result<PathBuf> {
        let path = self.plots_dir.join("covid_dashboard.png");
        dashboard::render(&path, tables, summary, self.top_n, &self.theme)?;
        Ok(path)
    }

    /// Correlation heatmap over the long-format dataset's numeric columns.
    pub fn render_correlation_heatmap(&self, matrix: &CorrelationMatrix) -> Result<PathBuf> {
        let path = self.plots_dir.join("correlation_heatmap.png");
        heatmap::render(&path, matrix, &self.theme)?;
        Ok(path)
    }

    /// Vaccination progress lines for the given countries.
    pub fn render_vaccination_progress(
        &self,
        rows: &[OwidRow],
        countries: &[String],
    ) -> Result<PathBuf> {
        let path = self.plots_dir.join("vaccination_progress.png");
        vaccination::render(&path, rows, countries, &self.theme)?;
        Ok(path)
    }
}

// ── Shared drawing helpers ───────────────────────────────────────────

/// Flatten plotters' backend-parameterized errors before they cross the
/// anyhow boundary.
pub(crate) fn chart_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("chart rendering failed: {e}")
}

/// Date/value axis ranges for one series; None when it cannot span an axis.
pub(crate) fn axis_ranges(series: &[(NaiveDate, f64)]) -> Option<(Range<NaiveDate>, Range<f64>)> {
    combined_ranges(&[series])
}

/// Axis ranges covering several series at once.
pub(crate) fn combined_ranges(
    series_set: &[&[(NaiveDate, f64)]],
) -> Option<(Range<NaiveDate>, Range<f64>)> {
    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;
    let mut max_value = f64::MIN;

    for series in series_set {
        for &(date, value) in *series {
            min_date = Some(min_date.map_or(date, |d| d.min(date)));
            max_date = Some(max_date.map_or(date, |d| d.max(date)));
            max_value = max_value.max(value);
        }
    }

    let first = min_date?;
    let last = max_date?;
    if first == last {
        return None;
    }
    let max_value = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };
    Some((first..last, 0.0..max_value))
}

/// Compact axis labels for large counts.
pub(crate) fn format_axis(v: f64) -> String {
    if v.abs() >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if v.abs() >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v.abs() >= 1e3 {
        format!("{:.0}K", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}

/// Thousands-separated whole number, for the dashboard summary text.
pub(crate) fn format_count(v: f64) -> String {
    let whole = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if v < 0.0 {
        format!("-{out}")
    } else {
        out
    }
}

/// One date-indexed line in its own panel.
pub(crate) fn draw_line_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    series: &[(NaiveDate, f64)],
    color: RGBColor,
    theme: &Theme,
) -> Result<()> {
    let Some((x_range, y_range)) = axis_ranges(series) else {
        return Ok(());
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", theme.caption_size))
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(5)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .y_label_formatter(&|v: &f64| format_axis(*v))
        .label_style(("sans-serif", theme.label_size))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().copied(),
            color.stroke_width(2),
        ))
        .map_err(chart_err)?;

    Ok(())
}

/// Several named date-indexed lines with a legend, in one panel.
pub(crate) fn draw_multi_line_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    series_set: &[(String, Vec<(NaiveDate, f64)>)],
    theme: &Theme,
) -> Result<()> {
    let all: Vec<&[(NaiveDate, f64)]> =
        series_set.iter().map(|(_, s)| s.as_slice()).collect();
    let Some((x_range, y_range)) = combined_ranges(&all) else {
        return Ok(());
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", theme.caption_size))
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(5)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .y_label_formatter(&|v: &f64| format_axis(*v))
        .label_style(("sans-serif", theme.label_size))
        .draw()
        .map_err(chart_err)?;

    for (i, (name, series)) in series_set.iter().enumerate() {
        let color = theme.color(i);
        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", theme.label_size))
        .draw()
        .map_err(chart_err)?;

    Ok(())
}

/// Horizontal top-N bars, largest at the top, names drawn on the bars.
pub(crate) fn draw_bar_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    ranked: &[RankedCountry],
    theme: &Theme,
) -> Result<()> {
    if ranked.is_empty() {
        return Ok(());
    }

    let max = ranked.iter().map(|r| r.value).fold(f64::MIN, f64::max);
    let max = if max > 0.0 { max * 1.05 } else { 1.0 };
    let count = ranked.len();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", theme.caption_size))
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(10)
        .build_cartesian_2d(0.0..max, 0.0..count as f64)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(5)
        .y_labels(0)
        .x_label_formatter(&|v: &f64| format_axis(*v))
        .label_style(("sans-serif", theme.label_size))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(ranked.iter().enumerate().map(|(i, r)| {
            let y = (count - 1 - i) as f64;
            Rectangle::new(
                [(0.0, y + 0.15), (r.value, y + 0.85)],
                theme.color(i).filled(),
            )
        }))
        .map_err(chart_err)?;

    chart
        .draw_series(ranked.iter().enumerate().map(|(i, r)| {
            let y = (count - 1 - i) as f64;
            Text::new(
                r.country.clone(),
                (max * 0.01, y + 0.62),
                ("sans-serif", theme.label_size).into_font(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}
