//! Run-level result types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Totals for one reconciliation run, produced once after all files are
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files with a recognized tabular extension found in the data directory.
    pub scanned: usize,
    /// Files that passed the required-field gate and produced a record.
    pub accepted: usize,
    /// Files skipped for any reason (header read failure, missing fields,
    /// unexpected error).
    pub skipped: usize,
    /// Destination of the persisted mapping artifact.
    pub metadata_path: PathBuf,
}

impl RunSummary {
    pub fn is_consistent(&self) -> bool {
        self.accepted + self.skipped == self.scanned
    }
}
