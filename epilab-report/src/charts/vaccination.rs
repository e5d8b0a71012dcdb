//! Vaccination progress lines for the largest countries.

use anyhow::Result;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

use super::{chart_err, draw_multi_line_panel};
use crate::theme::Theme;
use epilab_core::domain::OwidRow;

pub(crate) fn render(
    path: &Path,
    rows: &[OwidRow],
    countries: &[String],
    theme: &Theme,
) -> Result<()> {
    let mut series_set: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
    for country in countries {
        let mut series: Vec<(NaiveDate, f64)> = rows
            .iter()
            .filter(|r| &r.location == country)
            .filter_map(|r| Some((r.date, r.people_fully_vaccinated?)))
            .collect();
        series.sort_by_key(|p| p.0);
        if !series.is_empty() {
            series_set.push((country.clone(), series));
        }
    }
    anyhow::ensure!(!series_set.is_empty(), "no vaccination series to plot");

    let root = BitMapBackend::new(path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    draw_multi_line_panel(
        &root,
        "Vaccination Progress by Country",
        &series_set,
        theme,
    )?;

    root.present().map_err(chart_err)?;
    Ok(())
}
