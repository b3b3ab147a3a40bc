//! Summary-statistics file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extensions recognized as tabular summary-statistics files.
const SUMSTAT_EXTENSIONS: [&str; 2] = ["tsv", "txt"];

/// Lists all summary-statistics files in a directory.
///
/// Only files with a recognized tabular extension are considered.
/// Returns files sorted by filename so repeated runs over an unchanged
/// directory process files in the same order.
pub fn list_sumstat_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if has_sumstat_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

fn has_sumstat_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUMSTAT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
