//! Per-file column mappings and the persisted metadata record.

use serde::{Deserialize, Serialize};

/// How a canonical field is satisfied for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    /// Bound to an observed column in the file's header row.
    Column(String),
    /// Synthesized literal value, used only for the sample-size fallback.
    Literal(u64),
}

impl Binding {
    pub fn as_column(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<u64> {
        match self {
            Self::Column(_) => None,
            Self::Literal(value) => Some(*value),
        }
    }
}

/// Ordered mapping from canonical field to binding, built per file.
///
/// Insertion order is preserved so that the serialized artifact lists
/// fields in candidate-table declaration order. The resolver guarantees
/// that no observed column is bound to more than one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, Binding)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a field, replacing any existing binding for the same field.
    pub fn bind(&mut self, field: impl Into<String>, binding: Binding) {
        let field = field.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = binding;
        } else {
            self.entries.push((field, binding));
        }
    }

    pub fn get(&self, field: &str) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, binding)| binding)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries
            .iter()
            .map(|(field, binding)| (field.as_str(), binding))
    }

    /// Observed column names currently in use, for the injectivity check.
    pub fn bound_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|(_, binding)| binding.as_column())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One serialized mapping entry of a [`FileRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedColumn {
    /// An observed column mapped to a canonical field.
    Column {
        original: String,
        standardized: String,
    },
    /// A literal value standing in for a missing column (sample-size fallback).
    Literal { value: u64, standardized: String },
}

impl ResolvedColumn {
    pub fn standardized(&self) -> &str {
        match self {
            Self::Column { standardized, .. } | Self::Literal { standardized, .. } => standardized,
        }
    }
}

/// The unit persisted to the mapping artifact: one accepted file and its
/// resolved columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub columns: Vec<ResolvedColumn>,
}

impl FileRecord {
    pub fn from_mapping(filename: impl Into<String>, mapping: &ColumnMapping) -> Self {
        let columns = mapping
            .iter()
            .map(|(field, binding)| match binding {
                Binding::Column(name) => ResolvedColumn::Column {
                    original: name.clone(),
                    standardized: field.to_string(),
                },
                Binding::Literal(value) => ResolvedColumn::Literal {
                    value: *value,
                    standardized: field.to_string(),
                },
            })
            .collect();
        Self {
            filename: filename.into(),
            columns,
        }
    }

    pub fn column_for(&self, field: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.standardized() == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_replaces_existing_field() {
        let mut mapping = ColumnMapping::new();
        mapping.bind("N", Binding::Column("SampleSize".to_string()));
        mapping.bind("N", Binding::Literal(85_000));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("N").and_then(Binding::as_literal), Some(85_000));
    }

    #[test]
    fn mapping_preserves_insertion_order() {
        let mut mapping = ColumnMapping::new();
        mapping.bind("MARKERNAME", Binding::Column("SNP".to_string()));
        mapping.bind("P", Binding::Column("Pval".to_string()));
        let fields: Vec<&str> = mapping.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["MARKERNAME", "P"]);
    }

    #[test]
    fn record_carries_column_and_literal_bindings() {
        let mut mapping = ColumnMapping::new();
        mapping.bind("MARKERNAME", Binding::Column("SNP".to_string()));
        mapping.bind("N", Binding::Literal(42_000));
        let record = FileRecord::from_mapping("study1.tsv", &mapping);
        assert_eq!(record.columns.len(), 2);
        assert_eq!(
            record.column_for("N"),
            Some(&ResolvedColumn::Literal {
                value: 42_000,
                standardized: "N".to_string(),
            })
        );
    }
}
