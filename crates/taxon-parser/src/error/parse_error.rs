use std::slice;

use thiserror::Error;

use crate::error::Diagnostic;

/// A document that could not be loaded.
#[derive(Debug, Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// The diagnostics to report, for callers that render warnings and
    /// errors the same way.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        slice::from_ref(&self.diagnostic)
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
