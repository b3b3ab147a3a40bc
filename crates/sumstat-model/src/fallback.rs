//! Secondary sample-size source, keyed by filename.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filename to literal sample-size map, loaded once per run and consulted
/// only when a file's resolved mapping lacks an `N` binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSizeFallback {
    entries: BTreeMap<String, u64>,
}

impl SampleSizeFallback {
    pub fn new(entries: BTreeMap<String, u64>) -> Self {
        Self { entries }
    }

    pub fn get(&self, filename: &str) -> Option<u64> {
        self.entries.get(filename).copied()
    }

    pub fn insert(&mut self, filename: impl Into<String>, sample_size: u64) {
        self.entries.insert(filename.into(), sample_size);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
