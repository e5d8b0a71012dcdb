//! Global trend panels: one cumulative line per metric plus the CFR line.

use anyhow::Result;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

use super::{chart_err, draw_line_panel};
use crate::theme::Theme;
use epilab_core::domain::{GlobalPoint, Metric};
use epilab_core::summary::{case_fatality_series, metric_series};

pub(crate) fn render(path: &Path, summary: &[GlobalPoint], theme: &Theme) -> Result<()> {
    let root = BitMapBackend::new(path, (1400, 900)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled("Global Trends Over Time", ("sans-serif", 28))
        .map_err(chart_err)?;

    // Panels for whichever series exist, in a fixed order.
    let mut panel_inputs: Vec<(String, Vec<(NaiveDate, f64)>, usize)> = Vec::new();
    let titles = ["Total Confirmed Cases", "Total Deaths", "Total Recovered"];
    for (i, metric) in Metric::ALL.iter().enumerate() {
        let series = metric_series(summary, *metric);
        if !series.is_empty() {
            panel_inputs.push((titles[i].to_string(), series, i));
        }
    }
    let cfr = case_fatality_series(summary);
    if !cfr.is_empty() {
        panel_inputs.push(("Case Fatality Rate (%)".to_string(), cfr, 3));
    }

    let panels = root.split_evenly((2, 2));
    for (panel, (title, series, color_idx)) in panels.iter().zip(&panel_inputs) {
        draw_line_panel(panel, title, series, theme.color(*color_idx), theme)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}
