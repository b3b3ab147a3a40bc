//! Schema resolution engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use sumstat_model::{Binding, CandidateTable, ColumnMapping};

/// Result of resolving one file's header row against the candidate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Field-to-column bindings, in candidate-table declaration order.
    pub mapping: ColumnMapping,
    /// Required fields with no remaining candidate in the header row,
    /// in declaration order.
    pub missing_required: Vec<String>,
    /// One warning per field that matched more than one header.
    pub ambiguities: Vec<AmbiguityWarning>,
}

/// A field matched several observed headers; the earliest candidate in the
/// field's declared list was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityWarning {
    pub field: String,
    /// All matching headers, in candidate-list order.
    pub matched: Vec<String>,
    pub selected: String,
}

/// Resolves observed header rows against a canonical-field candidate table.
///
/// Matching is one-to-one: each observed header binds to at most one
/// canonical field, enforced with a used-name exclusion set. Fields are
/// visited in table declaration order, so earlier fields have strict
/// priority over later ones for contested names. Comparison is exact-string
/// and case-sensitive; no trimming is applied.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    table: CandidateTable,
    optional_fields: BTreeSet<String>,
}

impl SchemaResolver {
    pub fn new(table: CandidateTable, optional_fields: BTreeSet<String>) -> Self {
        Self {
            table,
            optional_fields,
        }
    }

    pub fn table(&self) -> &CandidateTable {
        &self.table
    }

    /// True when an empty candidate intersection for this field is tolerated.
    pub fn is_optional(&self, field: &str) -> bool {
        self.optional_fields.contains(field)
    }

    /// Resolves one header row.
    ///
    /// Never fails: missing required fields are reported in the return
    /// value, not as an error. Per field, in declaration order:
    /// no remaining candidate and required => missing; no remaining
    /// candidate and optional => skipped silently; one candidate => bound;
    /// several candidates => the first in the field's declared candidate
    /// order is bound (not header-row order) and a warning is emitted.
    pub fn resolve(&self, headers: &[String]) -> Resolution {
        let header_set: BTreeSet<&str> = headers.iter().map(String::as_str).collect();
        let mut used: BTreeSet<&str> = BTreeSet::new();
        let mut mapping = ColumnMapping::new();
        let mut missing_required = Vec::new();
        let mut ambiguities = Vec::new();

        for spec in self.table.fields() {
            let mut found: Vec<&str> = Vec::new();
            for candidate in &spec.candidates {
                let name = candidate.as_str();
                if header_set.contains(name) && !used.contains(name) && !found.contains(&name) {
                    found.push(name);
                }
            }

            let Some(selected) = found.first().copied() else {
                if !self.is_optional(&spec.field) {
                    missing_required.push(spec.field.clone());
                }
                continue;
            };

            used.insert(selected);
            mapping.bind(spec.field.clone(), Binding::Column(selected.to_string()));
            if found.len() > 1 {
                ambiguities.push(AmbiguityWarning {
                    field: spec.field.clone(),
                    matched: found.iter().map(|name| (*name).to_string()).collect(),
                    selected: selected.to_string(),
                });
            }
        }

        Resolution {
            mapping,
            missing_required,
            ambiguities,
        }
    }
}
