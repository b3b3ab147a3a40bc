//! Run configuration.
//!
//! The configuration is an explicitly constructed, immutable value passed
//! into the reconciler; there is no process-wide configuration state. Any
//! load failure is fatal and aborts before any file is processed.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Reconciliation run configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for summary-statistics files.
    pub data_dir: PathBuf,
    /// Canonical-field candidate table (JSON object, order significant).
    pub candidate_table_file: PathBuf,
    /// Destination of the mapping artifact.
    pub output_metadata_file: PathBuf,
    /// Run log destination; stderr when absent.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Optional filename-to-sample-size map consulted when a file has no
    /// `N` column.
    #[serde(default)]
    pub sample_size_fallback_file: Option<PathBuf>,
    /// Fields tolerated as absent during resolution.
    #[serde(default = "default_optional_fields")]
    pub optional_fields: Vec<String>,
    /// Stricter field set gating final acceptance, checked after the
    /// sample-size fallback.
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
    /// Genome build identifier recorded for the downstream harmonisation
    /// step.
    #[serde(default = "default_genome_build")]
    pub genome_build: String,
}

fn default_optional_fields() -> Vec<String> {
    vec![sumstat_model::SAMPLE_SIZE_FIELD.to_string()]
}

fn default_required_fields() -> Vec<String> {
    ["MARKERNAME", "CHROMOSOME", "POSITION", "P"]
        .iter()
        .map(|f| (*f).to_string())
        .collect()
}

fn default_genome_build() -> String {
    "38".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and validates the run configuration.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn minimal_config_applies_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "data_dir": "data",
                "candidate_table_file": "map.json",
                "output_metadata_file": "out/metadata.json"
            }"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.optional_fields, vec!["N"]);
        assert_eq!(
            config.required_fields,
            vec!["MARKERNAME", "CHROMOSOME", "POSITION", "P"]
        );
        assert_eq!(config.genome_build, "38");
        assert!(config.log_file.is_none());
        assert!(config.sample_size_fallback_file.is_none());
    }

    #[test]
    fn unknown_options_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "data_dir": "data",
                "candidate_table_file": "map.json",
                "output_metadata_file": "out/metadata.json",
                "output_metdata_file": "typo"
            }"#,
        )
        .unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn absent_config_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
