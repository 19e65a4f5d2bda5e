//! Error types for Parley operations.
//!
//! This module provides the main error type [`ParleyError`] which wraps
//! the error conditions that can occur while compiling a document.

use std::io;

use thiserror::Error;

use parley_parser::error::ParseError;

/// The main error type for Parley operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic of a failed compilation
/// together with the source text, so callers can render them with source
/// snippets.
#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ParleyError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
