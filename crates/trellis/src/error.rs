//! Error types for Trellis operations.
//!
//! This module provides the document-level error type [`TrellisError`].
//! Problems with a single component never reach this type: they are
//! handled inside the expander by emitting the component unchanged.

use std::{io, path::PathBuf};

use thiserror::Error;

use trellis_parser::error::ParseError;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source
/// spans, together with the source text they point into, so callers can
/// render rich reports.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to read template directory `{}`: {source}", dir.display())]
    Catalog {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TrellisError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
