#![deny(unsafe_code)]

pub mod error;
pub mod fallback;
pub mod mapping;
pub mod processing;
pub mod schema;

pub use error::{ModelError, Result};
pub use fallback::SampleSizeFallback;
pub use mapping::{Binding, ColumnMapping, FileRecord, ResolvedColumn};
pub use processing::RunSummary;
pub use schema::{CandidateTable, FieldSpec, SAMPLE_SIZE_FIELD};
