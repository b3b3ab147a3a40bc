//! Header-row reading for tab-delimited summary-statistics files.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Source of observed header rows.
///
/// The reconciler only ever needs the first record of each file; keeping
/// this behind a trait lets tests substitute in-memory headers without
/// touching the filesystem.
pub trait HeaderSource {
    /// Returns the ordered column names from the file's header row.
    fn read_headers(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads the first record of a tab-delimited text file.
///
/// Header values are returned exactly as they appear in the file; matching
/// downstream is exact-string and case-sensitive, so no trimming or BOM
/// stripping is applied here.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvHeaderSource;

impl HeaderSource for TsvHeaderSource {
    fn read_headers(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| map_csv_error(path, &source))?;

        let headers = reader
            .headers()
            .map_err(|source| map_csv_error(path, &source))?;

        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let headers: Vec<String> = headers.iter().map(String::from).collect();
        debug!(path = %path.display(), columns = headers.len(), "read header row");
        Ok(headers)
    }
}

fn map_csv_error(path: &Path, error: &csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io_error) = error.kind() {
        IngestError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(io_error.kind(), io_error.to_string()),
        }
    } else {
        IngestError::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}
