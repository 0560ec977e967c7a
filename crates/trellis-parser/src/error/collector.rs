//! Collector for accumulating diagnostics during a parse.
//!
//! The [`DiagnosticCollector`] lets the lexer and tree builder report every
//! problem in a document instead of stopping at the first one.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Wrap every collected diagnostic into a [`ParseError`].
    pub fn into_error(self) -> ParseError {
        ParseError::new(self.diagnostics)
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise warnings are logged and `Ok(())` is returned.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }

        for diagnostic in &self.diagnostics {
            warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
        }
        Ok(())
    }
}
