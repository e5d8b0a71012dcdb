//! Snapshot loading — wide tables and the typed long-format dataset.
//!
//! Loading is tolerant at the batch level: `load_all` tries every dataset,
//! downgrades per-dataset failures to stderr warnings, and returns only the
//! successes. A dataset that never downloaded simply isn't in the result and
//! must not block the others.

use super::source::{DataError, Dataset};
use super::store::SnapshotStore;
use crate::domain::{Metric, OwidRow};
use std::collections::BTreeMap;

/// A wide snapshot as read: header row plus string records.
///
/// Immutable once loaded; interpretation of the columns happens in the melt.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

/// Load a wide snapshot into a `RawTable`.
pub fn load_wide(store: &SnapshotStore, dataset: Dataset) -> Result<RawTable, DataError> {
    let text = store.read_to_string(dataset)?;
    let path = store.path(dataset).display().to_string();

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DataError::UnreadableSnapshot {
            path: path.clone(),
            reason: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| DataError::UnreadableSnapshot {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        records.push(record.iter().map(str::to_string).collect());
    }

    if records.is_empty() {
        return Err(DataError::SchemaMismatch {
            dataset: dataset.name(),
            reason: "no data rows".into(),
        });
    }

    Ok(RawTable { headers, records })
}

/// Load the long-format dataset into typed rows.
///
/// Rows that fail to deserialize (blank dates, ragged lines) are skipped.
pub fn load_owid(store: &SnapshotStore) -> Result<Vec<OwidRow>, DataError> {
    let text = store.read_to_string(Dataset::Owid)?;
    let mut rdr = csv::Reader::from_reader(text.as_bytes());

    let rows: Vec<OwidRow> = rdr.deserialize().filter_map(Result::ok).collect();
    if rows.is_empty() {
        return Err(DataError::SchemaMismatch {
            dataset: Dataset::Owid.name(),
            reason: "no parsable rows".into(),
        });
    }

    Ok(rows)
}

/// Everything that loaded successfully this run.
#[derive(Debug, Default)]
pub struct LoadedData {
    pub wide: BTreeMap<Metric, RawTable>,
    pub owid: Option<Vec<OwidRow>>,
}

impl LoadedData {
    pub fn is_empty(&self) -> bool {
        self.wide.is_empty() && self.owid.is_none()
    }

    pub fn loaded_count(&self) -> usize {
        self.wide.len() + usize::from(self.owid.is_some())
    }
}

/// Load every dataset, warning per failure and returning only the successes.
pub fn load_all(store: &SnapshotStore) -> LoadedData {
    let mut loaded = LoadedData::default();

    for dataset in Dataset::ALL {
        match dataset.metric() {
            Some(metric) => match load_wide(store, dataset) {
                Ok(table) => {
                    println!("Loaded {dataset}: {} rows", table.row_count());
                    loaded.wide.insert(metric, table);
                }
                Err(e) => eprintln!("WARNING: skipping {dataset}: {e}"),
            },
            None => match load_owid(store) {
                Ok(rows) => {
                    println!("Loaded {dataset}: {} rows", rows.len());
                    loaded.owid = Some(rows);
                }
                Err(e) => eprintln!("WARNING: skipping {dataset}: {e}"),
            },
        }
    }

    loaded
}
