//! Dataset registry and structured error types.
//!
//! The remote resources are fixed: three wide time-series snapshots from the
//! Johns Hopkins CSSE repository and one comprehensive long-format snapshot
//! from Our World in Data. Each dataset knows its URL and local file name.

use crate::domain::Metric;
use thiserror::Error;

const JHU_BASE: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/";
const OWID_BASE: &str = "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/";

/// A named remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Confirmed,
    Deaths,
    Recovered,
    Owid,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Confirmed,
        Dataset::Deaths,
        Dataset::Recovered,
        Dataset::Owid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Confirmed => "confirmed",
            Dataset::Deaths => "deaths",
            Dataset::Recovered => "recovered",
            Dataset::Owid => "owid",
        }
    }

    /// Local snapshot file name (identical to the remote file name).
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Confirmed => "time_series_covid19_confirmed_global.csv",
            Dataset::Deaths => "time_series_covid19_deaths_global.csv",
            Dataset::Recovered => "time_series_covid19_recovered_global.csv",
            Dataset::Owid => "owid-covid-data.csv",
        }
    }

    /// Full download URL.
    pub fn url(&self) -> String {
        match self {
            Dataset::Owid => format!("{OWID_BASE}{}", self.file_name()),
            _ => format!("{JHU_BASE}{}", self.file_name()),
        }
    }

    /// The metric a wide snapshot melts into; None for the long-format one.
    pub fn metric(&self) -> Option<Metric> {
        match self {
            Dataset::Confirmed => Some(Metric::Confirmed),
            Dataset::Deaths => Some(Metric::Deaths),
            Dataset::Recovered => Some(Metric::Recovered),
            Dataset::Owid => None,
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} fetching {dataset}")]
    HttpStatus { dataset: &'static str, status: u16 },

    #[error("snapshot store error: {0}")]
    Store(String),

    #[error("snapshot not found: {0}")]
    SnapshotMissing(String),

    #[error("unreadable snapshot {path}: {reason}")]
    UnreadableSnapshot { path: String, reason: String },

    #[error("schema mismatch in {dataset}: {reason}")]
    SchemaMismatch {
        dataset: &'static str,
        reason: String,
    },
}

/// Progress callback for multi-dataset fetches.
pub trait FetchProgress {
    /// Called when starting to fetch a dataset.
    fn on_start(&self, dataset: Dataset, index: usize, total: usize);

    /// Called when a dataset fetch completes.
    fn on_complete(
        &self,
        dataset: Dataset,
        index: usize,
        total: usize,
        result: &Result<(), DataError>,
    );

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, dataset: Dataset, index: usize, total: usize) {
        println!("[{}/{}] Downloading {dataset}...", index + 1, total);
    }

    fn on_complete(
        &self,
        dataset: Dataset,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        match result {
            Ok(()) => println!("  OK: {dataset}"),
            Err(e) => println!("  FAIL: {dataset}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nDownload complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}
