//! Loaders for the run inputs: the canonical-field candidate table and the
//! sample-size fallback map.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use sumstat_model::{CandidateTable, FieldSpec, SampleSizeFallback};

use crate::error::{IngestError, Result};

/// Loads the canonical-field candidate table from a JSON object of the form
/// `{"MARKERNAME": ["SNP", "rsid"], ...}`.
///
/// Key order in the document is preserved (serde_json's `preserve_order`
/// feature) because declaration order is the resolver's priority order.
pub fn load_candidate_table(path: &Path) -> Result<CandidateTable> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|source| IngestError::parse(path, source.to_string()))?;

    let mut fields = Vec::with_capacity(object.len());
    for (field, value) in object {
        let candidates: Vec<String> = serde_json::from_value(value).map_err(|source| {
            IngestError::parse(path, format!("field {field}: {source}"))
        })?;
        fields.push(FieldSpec::new(field, candidates));
    }

    if fields.is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let table = CandidateTable::new(fields)
        .map_err(|source| IngestError::parse(path, source.to_string()))?;
    debug!(path = %path.display(), fields = table.len(), "loaded candidate table");
    Ok(table)
}

/// Loads the filename-to-sample-size fallback map from a JSON object of the
/// form `{"gwas_a.tsv": 85000, ...}`.
pub fn load_sample_size_fallback(path: &Path) -> Result<SampleSizeFallback> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;

    let entries: BTreeMap<String, u64> = serde_json::from_str(&raw)
        .map_err(|source| IngestError::parse(path, source.to_string()))?;

    debug!(path = %path.display(), entries = entries.len(), "loaded sample-size fallback");
    Ok(SampleSizeFallback::new(entries))
}
