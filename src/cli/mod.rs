//! CLI support for cardq
//!
//! Provides programmatic access to the cardq CLI functionality, so tools that
//! embed the compiler can reuse its output formats.

mod check;
mod docs;

pub use check::{execute_check, CheckOptions, CheckResult, OutputFormat};
pub use docs::get_fields_reference;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No query provided. Pass a query or pipe queries to stdin, one per line.")]
    NoInput,
    #[error("{failed} of {total} queries failed")]
    Failed { failed: usize, total: usize },
}
