//! Verbatim snapshot store.
//!
//! Layout: `{raw_dir}/{file_name}` with a `{file_name}.meta.json` sidecar.
//! Snapshot bytes are persisted exactly as fetched. Writes are atomic (write
//! to .tmp, rename into place); the sidecar records byte length, a BLAKE3
//! content hash, and the fetch timestamp.

use super::source::{DataError, Dataset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata sidecar for a stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub dataset: String,
    pub byte_len: u64,
    pub content_hash: String,
    pub fetched_at: chrono::NaiveDateTime,
}

/// The snapshot store.
pub struct SnapshotStore {
    raw_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
        }
    }

    /// Root directory of the store.
    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Path of a dataset's snapshot file.
    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.raw_dir.join(dataset.file_name())
    }

    /// Path of a dataset's metadata sidecar.
    fn meta_path(&self, dataset: Dataset) -> PathBuf {
        self.raw_dir.join(format!("{}.meta.json", dataset.file_name()))
    }

    pub fn exists(&self, dataset: Dataset) -> bool {
        self.path(dataset).is_file()
    }

    /// Write a snapshot verbatim. Atomic: write to .tmp then rename.
    pub fn write(&self, dataset: Dataset, bytes: &[u8]) -> Result<(), DataError> {
        fs::create_dir_all(&self.raw_dir)
            .map_err(|e| DataError::Store(format!("failed to create dir: {e}")))?;

        let path = self.path(dataset);
        let tmp_path = path.with_extension("csv.tmp");
        fs::write(&tmp_path, bytes)
            .map_err(|e| DataError::Store(format!("write failed: {e}")))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            // Clean up temp file on rename failure
            let _ = fs::remove_file(&tmp_path);
            DataError::Store(format!("atomic rename failed: {e}"))
        })?;

        let meta = SnapshotMeta {
            dataset: dataset.name().to_string(),
            byte_len: bytes.len() as u64,
            content_hash: blake3::hash(bytes).to_hex().to_string(),
            fetched_at: chrono::Local::now().naive_local(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| DataError::Store(format!("meta serialization: {e}")))?;
        fs::write(self.meta_path(dataset), meta_json)
            .map_err(|e| DataError::Store(format!("meta write: {e}")))?;

        Ok(())
    }

    /// Read a snapshot back as text.
    pub fn read_to_string(&self, dataset: Dataset) -> Result<String, DataError> {
        let path = self.path(dataset);
        if !path.is_file() {
            return Err(DataError::SnapshotMissing(path.display().to_string()));
        }
        fs::read_to_string(&path).map_err(|e| DataError::UnreadableSnapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a snapshot's sidecar, if present and parsable.
    pub fn meta(&self, dataset: Dataset) -> Option<SnapshotMeta> {
        let content = fs::read_to_string(self.meta_path(dataset)).ok()?;
        serde_json::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let body = "a,b\n1,2\n";
        store.write(Dataset::Confirmed, body.as_bytes()).unwrap();

        assert!(store.exists(Dataset::Confirmed));
        assert_eq!(store.read_to_string(Dataset::Confirmed).unwrap(), body);
    }

    #[test]
    fn sidecar_records_length_and_hash() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let body = b"location,date\nAland,2021-01-01\n";
        store.write(Dataset::Owid, body).unwrap();

        let meta = store.meta(Dataset::Owid).unwrap();
        assert_eq!(meta.dataset, "owid");
        assert_eq!(meta.byte_len, body.len() as u64);
        assert_eq!(meta.content_hash, blake3::hash(body).to_hex().to_string());
    }

    #[test]
    fn missing_snapshot_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let err = store.read_to_string(Dataset::Deaths).unwrap_err();
        assert!(matches!(err, DataError::SnapshotMissing(_)));
    }

    #[test]
    fn rewrite_replaces_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        store.write(Dataset::Confirmed, b"old").unwrap();
        store.write(Dataset::Confirmed, b"new").unwrap();

        assert_eq!(store.read_to_string(Dataset::Confirmed).unwrap(), "new");
        assert_eq!(store.meta(Dataset::Confirmed).unwrap().byte_len, 3);
    }
}
