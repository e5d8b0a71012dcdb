//! Epilab Report — run configuration, chart theme, renderer, and pipeline.
//!
//! This crate builds on `epilab-core` to provide:
//! - TOML run configuration with defaults matching the original layout
//! - An explicit chart theme (no ambient style state)
//! - The fixed set of PNG chart artifacts
//! - The sequential fetch → load → transform → render pipeline

pub mod charts;
pub mod config;
pub mod pipeline;
pub mod theme;

pub use charts::ChartSet;
pub use config::{ConfigError, RunConfig};
pub use pipeline::{run_pipeline, run_pipeline_with, PipelineError, PipelineReport};
pub use theme::Theme;
