#![deny(unsafe_code)]

pub mod engine;

pub use engine::{AmbiguityWarning, Resolution, SchemaResolver};
