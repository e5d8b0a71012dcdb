//! Epilab CLI — snapshot fetch and full pipeline commands.
//!
//! Commands:
//! - `fetch` — download the remote snapshots into the raw data directory
//! - `run` — execute the whole pipeline and print the generated artifacts

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use epilab_core::data::{Dataset, HttpFetcher, SnapshotStore, StdoutProgress};
use epilab_report::{run_pipeline_with, PipelineError, PipelineReport, RunConfig};

#[derive(Parser)]
#[command(name = "epilab", about = "Epilab CLI — pandemic time-series charts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the remote snapshots into the raw data directory.
    Fetch {
        /// Raw snapshot directory. Defaults to ./data/raw.
        #[arg(long, default_value = "data/raw")]
        raw_dir: PathBuf,
    },
    /// Run the whole pipeline: fetch, load, transform, render.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Raw snapshot directory (overrides the config).
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Chart output directory (overrides the config).
        #[arg(long)]
        plots_dir: Option<PathBuf>,

        /// Skip the fetch stage and run from existing snapshots.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { raw_dir } => run_fetch(raw_dir),
        Commands::Run {
            config,
            raw_dir,
            plots_dir,
            offline,
        } => run_cmd(config, raw_dir, plots_dir, offline),
    }
}

fn run_fetch(raw_dir: PathBuf) -> Result<()> {
    let store = SnapshotStore::new(raw_dir);
    let fetcher = HttpFetcher::new();

    let summary = fetcher.fetch_all(&store, &Dataset::ALL, &StdoutProgress);

    if !summary.all_succeeded() {
        for (dataset, err) in &summary.errors {
            eprintln!("Error for {dataset}: {err}");
        }
    }
    if summary.succeeded == 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn run_cmd(
    config_path: Option<PathBuf>,
    raw_dir: Option<PathBuf>,
    plots_dir: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = raw_dir {
        config.data.raw_dir = dir;
    }
    if let Some(dir) = plots_dir {
        config.output.plots_dir = dir;
    }

    match run_pipeline_with(&config, offline) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(PipelineError::NoData) => {
            eprintln!("No datasets loaded. Exiting.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &PipelineReport) {
    println!();
    println!("=== Run Complete ===");
    if let Some(fetch) = &report.fetch {
        println!(
            "Downloads:        {}/{} succeeded",
            fetch.succeeded, fetch.total
        );
    }
    println!("Datasets loaded:  {}", report.loaded.join(", "));
    if !report.skipped.is_empty() {
        println!("Charts skipped:   {}", report.skipped.join(", "));
    }
    println!("Generated artifacts:");
    for path in &report.generated {
        println!("  {}", path.display());
    }
}
