//! Batch reconciliation pipeline with explicit stages.
//!
//! The run follows these stages in order:
//! 1. **Discover**: list summary-statistics files in the data directory
//! 2. **Resolve**: per file, read the header row and resolve it against the
//!    candidate table
//! 3. **Fallback**: synthesize a literal sample-size binding when a file has
//!    no `N` column but a fallback entry exists
//! 4. **Gate**: enforce the stricter required-field set
//! 5. **Persist**: write the mapping artifact once, after the full loop
//!
//! Per-file processing is a pure function returning a tagged outcome, so a
//! single bad file never terminates the batch; every skip carries its
//! reason and is logged.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, warn};

use sumstat_ingest::{HeaderSource, IngestError, list_sumstat_files};
use sumstat_map::SchemaResolver;
use sumstat_model::{
    Binding, FileRecord, RunSummary, SAMPLE_SIZE_FIELD, SampleSizeFallback,
};

/// Why a file was skipped. Every variant is terminal for the file and
/// non-fatal for the run.
#[derive(Debug)]
pub enum SkipReason {
    /// The header row could not be obtained.
    HeaderRead(IngestError),
    /// Required fields unbound after resolution and fallback.
    MissingRequired(Vec<String>),
    /// Anything else; contained so the batch continues.
    Unexpected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderRead(error) => write!(f, "header read failed: {error}"),
            Self::MissingRequired(fields) => {
                write!(f, "missing required columns: {}", fields.join(", "))
            }
            Self::Unexpected(message) => write!(f, "unexpected error: {message}"),
        }
    }
}

/// Terminal state of one file's processing.
#[derive(Debug)]
pub enum FileStatus {
    Accepted(FileRecord),
    Skipped(SkipReason),
}

/// One file's outcome, in processing order.
#[derive(Debug)]
pub struct FileOutcome {
    pub filename: String,
    pub status: FileStatus,
}

/// Aggregate outcome of the batch loop.
#[derive(Debug)]
pub struct ReconcileResult {
    pub outcomes: Vec<FileOutcome>,
}

impl ReconcileResult {
    /// Accepted records in processing order; this is the artifact content.
    pub fn records(&self) -> Vec<FileRecord> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                FileStatus::Accepted(record) => Some(record.clone()),
                FileStatus::Skipped(_) => None,
            })
            .collect()
    }

    pub fn scanned(&self) -> usize {
        self.outcomes.len()
    }

    pub fn accepted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Accepted(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Skipped(_)))
            .count()
    }

    pub fn run_summary(&self, metadata_path: &Path) -> RunSummary {
        RunSummary {
            scanned: self.scanned(),
            accepted: self.accepted(),
            skipped: self.skipped(),
            metadata_path: metadata_path.to_path_buf(),
        }
    }
}

/// Input for processing a single file.
pub struct ProcessFileInput<'a> {
    pub filename: &'a str,
    pub path: &'a Path,
    pub resolver: &'a SchemaResolver,
    pub header_source: &'a dyn HeaderSource,
    /// Acceptance gate, checked against the final mapping (after fallback).
    /// Distinct from the resolver-level optional flags.
    pub required_fields: &'a [String],
    pub fallback: &'a SampleSizeFallback,
}

/// Processes one file: header read, schema resolution, sample-size
/// fallback, required-field gate.
///
/// Infallible by design; failures are data in the returned status.
pub fn process_file(input: &ProcessFileInput<'_>) -> FileStatus {
    let headers = match input.header_source.read_headers(input.path) {
        Ok(headers) => headers,
        Err(source) => return FileStatus::Skipped(SkipReason::HeaderRead(source)),
    };

    let resolution = input.resolver.resolve(&headers);
    for warning in &resolution.ambiguities {
        warn!(
            filename = %input.filename,
            field = %warning.field,
            matched = ?warning.matched,
            selected = %warning.selected,
            "multiple candidate columns matched"
        );
    }
    for field in &resolution.missing_required {
        error!(
            filename = %input.filename,
            field = %field,
            "no match found for standardized column"
        );
    }

    let mut mapping = resolution.mapping;

    // Sample-size fallback applies only when N resolved as optional; a
    // table that marks N required already reported it above.
    let n_was_required = resolution
        .missing_required
        .iter()
        .any(|field| field == SAMPLE_SIZE_FIELD);
    if !mapping.contains(SAMPLE_SIZE_FIELD) && !n_was_required {
        match input.fallback.get(input.filename) {
            Some(sample_size) => {
                info!(
                    filename = %input.filename,
                    sample_size,
                    "using sample size from fallback table"
                );
                mapping.bind(SAMPLE_SIZE_FIELD, Binding::Literal(sample_size));
            }
            None => {
                warn!(
                    filename = %input.filename,
                    "no sample-size column or fallback entry; proceeding without N"
                );
            }
        }
    }

    let missing: Vec<String> = input
        .required_fields
        .iter()
        .filter(|field| !mapping.contains(field))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return FileStatus::Skipped(SkipReason::MissingRequired(missing));
    }

    FileStatus::Accepted(FileRecord::from_mapping(input.filename, &mapping))
}

/// Input for the batch loop.
pub struct ReconcileInput<'a> {
    pub data_dir: &'a Path,
    pub resolver: &'a SchemaResolver,
    pub header_source: &'a dyn HeaderSource,
    pub required_fields: &'a [String],
    pub fallback: &'a SampleSizeFallback,
}

/// Runs the batch loop over all discovered files, in filename order.
///
/// Per-file failures are contained; only a failure to list the data
/// directory aborts the run.
pub fn reconcile(input: &ReconcileInput<'_>) -> Result<ReconcileResult> {
    let files = list_sumstat_files(input.data_dir).with_context(|| {
        format!(
            "list summary-statistics files in {}",
            input.data_dir.display()
        )
    })?;
    info!(files = files.len(), data_dir = %input.data_dir.display(), "starting reconciliation");

    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        let filename = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => {
                let display_name = path.display().to_string();
                error!(path = %display_name, "skipping file with non-UTF-8 name");
                outcomes.push(FileOutcome {
                    filename: display_name,
                    status: FileStatus::Skipped(SkipReason::Unexpected(
                        "non-UTF-8 filename".to_string(),
                    )),
                });
                continue;
            }
        };

        let file_span = info_span!("file", filename = %filename);
        let status = file_span.in_scope(|| {
            info!(filename = %filename, "processing file");
            process_file(&ProcessFileInput {
                filename: &filename,
                path,
                resolver: input.resolver,
                header_source: input.header_source,
                required_fields: input.required_fields,
                fallback: input.fallback,
            })
        });

        match &status {
            FileStatus::Accepted(record) => {
                info!(
                    filename = %filename,
                    columns = record.columns.len(),
                    "file accepted"
                );
            }
            FileStatus::Skipped(reason) => {
                error!(filename = %filename, reason = %reason, "skipping file");
            }
        }
        outcomes.push(FileOutcome { filename, status });
    }

    Ok(ReconcileResult { outcomes })
}

/// Writes the mapping artifact.
///
/// Called once, after the loop completes; a killed run leaves no partial
/// artifact.
pub fn write_metadata(path: &Path, records: &[FileRecord]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(records).context("serialize mapping artifact")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "wrote mapping artifact");
    Ok(())
}
