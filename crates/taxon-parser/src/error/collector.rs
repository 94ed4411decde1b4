use log::debug;

use crate::error::Diagnostic;

/// Accumulates warnings while a graph is built.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(code:% = diagnostic.code(), message = diagnostic.message(); "Diagnostic emitted");
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
