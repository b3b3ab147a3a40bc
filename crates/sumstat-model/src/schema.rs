//! Canonical-field schema: the table of acceptable source names per field.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Canonical identifier of the sample-size field, the only field that is
/// optional at the resolver level by default.
pub const SAMPLE_SIZE_FIELD: &str = "N";

/// One canonical field together with its ordered list of acceptable
/// source column names.
///
/// Candidate order matters: when several candidates appear in the same
/// header row, the earliest candidate in this list is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Canonical field identifier (e.g. `MARKERNAME`, `CHROMOSOME`, `P`).
    pub field: String,
    /// Acceptable source column names, in selection-priority order.
    pub candidates: Vec<String>,
}

impl FieldSpec {
    pub fn new(field: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            field: field.into(),
            candidates,
        }
    }
}

/// Ordered canonical-field candidate table.
///
/// Declaration order is resolution priority: earlier fields claim contested
/// source names before later fields get to see them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTable {
    fields: Vec<FieldSpec>,
}

impl CandidateTable {
    /// Builds a table from field specs, rejecting duplicate or empty
    /// field identifiers.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for spec in &fields {
            if spec.field.is_empty() {
                return Err(ModelError::EmptyFieldId);
            }
            if !seen.insert(spec.field.as_str()) {
                return Err(ModelError::DuplicateField(spec.field.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Canonical field identifiers in declaration order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|spec| spec.field.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|spec| spec.field == field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
