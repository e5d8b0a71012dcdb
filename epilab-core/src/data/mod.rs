//! Snapshot acquisition and loading.

pub mod fetch;
pub mod load;
pub mod source;
pub mod store;

pub use fetch::{FetchSummary, HttpFetcher};
pub use load::{load_all, load_owid, load_wide, LoadedData, RawTable};
pub use source::{DataError, Dataset, FetchProgress, StdoutProgress};
pub use store::{SnapshotMeta, SnapshotStore};
