//! Correlation heatmap with per-cell annotations.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use super::chart_err;
use crate::theme::Theme;
use epilab_core::summary::CorrelationMatrix;

pub(crate) fn render(path: &Path, matrix: &CorrelationMatrix, theme: &Theme) -> Result<()> {
    let n = matrix.size();
    anyhow::ensure!(n >= 2, "correlation matrix too small to draw");

    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled("Metric Correlation Heatmap", ("sans-serif", 26))
        .map_err(chart_err)?;

    let x_labels = matrix.labels.clone();
    let y_labels = matrix.labels.clone();

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(190)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&move |x: &f64| label_at(&x_labels, *x))
        .y_label_formatter(&move |y: &f64| label_at(&y_labels, *y))
        .label_style(("sans-serif", theme.label_size))
        .draw()
        .map_err(chart_err)?;

    // Cell fills: column i on x, row j on y.
    chart
        .draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(|(i, j)| {
            let v = matrix.values[j][i];
            Rectangle::new(
                [(i as f64, j as f64), (i as f64 + 1.0, j as f64 + 1.0)],
                diverging_color(v).filled(),
            )
        }))
        .map_err(chart_err)?;

    // Per-cell annotations.
    chart
        .draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(|(i, j)| {
            let v = matrix.values[j][i];
            let text = if v.is_finite() {
                format!("{v:.2}")
            } else {
                "n/a".to_string()
            };
            Text::new(
                text,
                (i as f64 + 0.32, j as f64 + 0.58),
                ("sans-serif", 12).into_font(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn label_at(labels: &[&'static str], position: f64) -> String {
    let idx = position.floor() as usize;
    labels.get(idx).copied().unwrap_or("").to_string()
}

/// Cool-to-warm diverging map over [-1, 1]; NaN renders as neutral grey.
fn diverging_color(v: f64) -> RGBColor {
    if !v.is_finite() {
        return RGBColor(220, 220, 220);
    }
    let t = ((v + 1.0) / 2.0).clamp(0.0, 1.0);
    let (r, g, b) = if t < 0.5 {
        lerp((59, 76, 192), (245, 245, 245), t / 0.5)
    } else {
        lerp((245, 245, 245), (180, 4, 38), (t - 0.5) / 0.5)
    };
    RGBColor(r, g, b)
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diverging_extremes_and_midpoint() {
        assert_eq!(diverging_color(-1.0), RGBColor(59, 76, 192));
        assert_eq!(diverging_color(1.0), RGBColor(180, 4, 38));
        assert_eq!(diverging_color(0.0), RGBColor(245, 245, 245));
        assert_eq!(diverging_color(f64::NAN), RGBColor(220, 220, 220));
    }
}
