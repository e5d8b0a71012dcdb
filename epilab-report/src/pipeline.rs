//! Pipeline orchestration: fetch → load → transform → summarize → render.
//!
//! Strictly sequential, single pass; every run reprocesses the full snapshots
//! from scratch. Stages tolerate partial input — a failed download or an
//! unloadable snapshot narrows the output, and a chart whose inputs are
//! missing is skipped with a notice. The only fatal case is zero datasets
//! loaded.

use std::path::PathBuf;
use thiserror::Error;

use crate::charts::ChartSet;
use crate::config::RunConfig;
use epilab_core::data::{
    load_all, Dataset, FetchSummary, HttpFetcher, SnapshotStore, StdoutProgress,
};
use epilab_core::domain::MetricTable;
use epilab_core::summary::{correlation_matrix, global_summary, top_by_population};
use epilab_core::transform::{
    derive_metric_table, melt_wide, sum_by_country_date, COUNTRY_COLUMN, WIDE_ID_COLUMNS,
};

/// Errors that abort the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no datasets loaded; nothing to do")]
    NoData,

    #[error("output directory error: {0}")]
    Output(String),
}

/// What a run produced.
#[derive(Debug)]
pub struct PipelineReport {
    /// Fetch summary; None when the run was offline.
    pub fetch: Option<FetchSummary>,
    /// Names of the datasets that loaded.
    pub loaded: Vec<String>,
    /// Chart artifacts written this run.
    pub generated: Vec<PathBuf>,
    /// Charts skipped, with the notice already printed.
    pub skipped: Vec<String>,
}

/// Run the whole pipeline: fetch, load, transform, render.
pub fn run_pipeline(config: &RunConfig) -> Result<PipelineReport, PipelineError> {
    run_pipeline_with(config, false)
}

/// Run the pipeline, optionally skipping the fetch stage.
pub fn run_pipeline_with(config: &RunConfig, offline: bool) -> Result<PipelineReport, PipelineError> {
    let store = SnapshotStore::new(&config.data.raw_dir);

    // Stage 1: fetch. Per-dataset failures are recorded and the run continues.
    let fetch = if offline {
        None
    } else {
        let fetcher = HttpFetcher::new();
        Some(fetcher.fetch_all(&store, &Dataset::ALL, &StdoutProgress))
    };

    // Stage 2: load whatever made it to disk.
    let loaded = load_all(&store);
    if loaded.is_empty() {
        return Err(PipelineError::NoData);
    }

    // Stage 3: transform each wide table. A melt failure (bad date header)
    // drops that resource, not the run.
    let window = config.transform.ma_window;
    let mut tables: Vec<MetricTable> = Vec::new();
    for (metric, raw) in &loaded.wide {
        match melt_wide(raw, &WIDE_ID_COLUMNS, COUNTRY_COLUMN) {
            Ok(records) => {
                let aggregated = sum_by_country_date(records);
                tables.push(derive_metric_table(*metric, aggregated, window));
            }
            Err(e) => eprintln!("WARNING: skipping {metric}: {e}"),
        }
    }

    // Stage 4: cross-country summaries.
    let summary = global_summary(&tables);

    // Stage 5: render. Each chart is independent; failures and missing
    // inputs are notices, never run failures.
    let charts = ChartSet::new(&config.output.plots_dir, config.chart_theme(), config.transform.top_n)
        .map_err(|e| PipelineError::Output(e.to_string()))?;

    let mut generated: Vec<PathBuf> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    if summary.is_empty() {
        skip_notice(&mut skipped, "global_trends", "no global summary");
    } else {
        match charts.render_global_trends(&summary) {
            Ok(path) => generated.push(path),
            Err(e) => skip_notice(&mut skipped, "global_trends", &e.to_string()),
        }
    }

    for table in &tables {
        let name = format!("top_countries_{}", table.metric);
        if table.rows.is_empty() {
            skip_notice(&mut skipped, &name, "empty table");
            continue;
        }
        match charts.render_top_countries(table) {
            Ok(path) => generated.push(path),
            Err(e) => skip_notice(&mut skipped, &name, &e.to_string()),
        }
    }

    if tables.is_empty() {
        skip_notice(&mut skipped, "covid_dashboard", "no wide datasets");
    } else {
        match charts.render_dashboard(&tables, &summary) {
            Ok(path) => generated.push(path),
            Err(e) => skip_notice(&mut skipped, "covid_dashboard", &e.to_string()),
        }
    }

    match &loaded.owid {
        Some(rows) => {
            match correlation_matrix(rows) {
                Some(matrix) => match charts.render_correlation_heatmap(&matrix) {
                    Ok(path) => generated.push(path),
                    Err(e) => skip_notice(&mut skipped, "correlation_heatmap", &e.to_string()),
                },
                None => skip_notice(
                    &mut skipped,
                    "correlation_heatmap",
                    "insufficient numeric columns",
                ),
            }

            if rows.iter().any(|r| r.people_fully_vaccinated.is_some()) {
                let countries = top_by_population(rows, 10);
                match charts.render_vaccination_progress(rows, &countries) {
                    Ok(path) => generated.push(path),
                    Err(e) => skip_notice(&mut skipped, "vaccination_progress", &e.to_string()),
                }
            } else {
                skip_notice(
                    &mut skipped,
                    "vaccination_progress",
                    "vaccination columns absent",
                );
            }
        }
        None => {
            skip_notice(
                &mut skipped,
                "correlation_heatmap",
                "comprehensive dataset unavailable",
            );
            skip_notice(
                &mut skipped,
                "vaccination_progress",
                "comprehensive dataset unavailable",
            );
        }
    }

    let loaded_names: Vec<String> = loaded
        .wide
        .keys()
        .map(|m| m.to_string())
        .chain(loaded.owid.is_some().then(|| "owid".to_string()))
        .collect();

    Ok(PipelineReport {
        fetch,
        loaded: loaded_names,
        generated,
        skipped,
    })
}

fn skip_notice(skipped: &mut Vec<String>, chart: &str, reason: &str) {
    println!("Skipping {chart}: {reason}");
    skipped.push(chart.to_string());
}
