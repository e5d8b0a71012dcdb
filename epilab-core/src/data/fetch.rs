//! Snapshot fetcher — sequential HTTP downloads with per-dataset failure tolerance.
//!
//! One GET per dataset against its fixed URL; the response body is persisted
//! verbatim through the snapshot store. A failed dataset is recorded in the
//! summary and the loop moves on to the next one. No retry, no backoff.

use super::source::{DataError, Dataset, FetchProgress};
use super::store::SnapshotStore;
use std::time::Duration;

/// HTTP fetcher over the fixed dataset registry.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("epilab/0.1")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Fetch one dataset and persist it verbatim.
    pub fn fetch_one(&self, store: &SnapshotStore, dataset: Dataset) -> Result<(), DataError> {
        let url = dataset.url();
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                dataset: dataset.name(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        store.write(dataset, &body)
    }

    /// Fetch every dataset in order, tolerating per-dataset failure.
    ///
    /// Returns a summary of successes and failures; never aborts the batch.
    pub fn fetch_all(
        &self,
        store: &SnapshotStore,
        datasets: &[Dataset],
        progress: &dyn FetchProgress,
    ) -> FetchSummary {
        let total = datasets.len();
        let mut succeeded = 0;
        let mut failed = 0;
        let mut errors: Vec<(Dataset, DataError)> = Vec::new();

        for (i, &dataset) in datasets.iter().enumerate() {
            progress.on_start(dataset, i, total);
            let result = self.fetch_one(store, dataset);
            progress.on_complete(dataset, i, total, &result);

            match result {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    errors.push((dataset, e));
                    failed += 1;
                }
            }
        }

        progress.on_batch_complete(succeeded, failed, total);

        FetchSummary {
            total,
            succeeded,
            failed,
            errors,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a batch fetch operation.
#[derive(Debug)]
pub struct FetchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(Dataset, DataError)>,
}

impl FetchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
