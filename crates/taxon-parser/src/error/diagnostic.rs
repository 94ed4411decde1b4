use std::fmt;

use crate::{
    Span,
    error::{ErrorCode, Severity},
};

/// A source span with a short note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One problem found in a document.
///
/// A diagnostic points at the offending table header (`at`) and optionally
/// at related tables elsewhere in the document (`related`). Rendered in the
/// CLI as:
///
/// ```text
/// warning[E101]: Arc 'A.e.f' expects a Node for 'A.e'.
///    ╭─[3:1]
///  3 │ [A.e]
///    · ──┬──
///    ·   ╰── 'A.e' is an arc
///  5 │ [A.e.f]
///    · ───┬───
///    ·    ╰── arc declared here
///    ╰────
///   help: declare arcs directly beneath a node table
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    primary: Option<Label>,
    related: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            primary: None,
            related: Vec::new(),
            help: None,
        }
    }

    /// Set the location the diagnostic is about.
    pub fn at(mut self, span: Span, message: impl Into<String>) -> Self {
        self.primary = Some(Label::new(span, message));
        self
    }

    /// Point at another table involved in the problem.
    pub fn related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related.push(Label::new(span, message));
        self
    }

    /// Replace the code's default help.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn primary(&self) -> Option<&Label> {
        self.primary.as_ref()
    }

    pub fn related_labels(&self) -> &[Label] {
        &self.related
    }

    pub fn help(&self) -> &str {
        self.help
            .as_deref()
            .unwrap_or_else(|| self.code.default_help())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity(), self.code, self.message)
    }
}
