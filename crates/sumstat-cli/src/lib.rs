//! CLI library components for the summary-statistics harmoniser.

#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod pipeline;
