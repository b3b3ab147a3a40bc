#![deny(unsafe_code)]

pub mod discovery;
pub mod error;
pub mod header;
pub mod tables;

pub use discovery::list_sumstat_files;
pub use error::{IngestError, Result};
pub use header::{HeaderSource, TsvHeaderSource};
pub use tables::{load_candidate_table, load_sample_size_fallback};
