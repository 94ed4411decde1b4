//! miette rendering for Taxon diagnostics and errors.
//!
//! A [`Report`] is a flattened, owned view of either a graph-building
//! [`Diagnostic`] or a [`TaxonError`]. Parse errors keep the document text
//! so the offending header is shown in context; other errors render as a
//! single coded line.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceCode,
    SourceSpan,
};

use taxon::TaxonError;
use taxon_parser::{
    Span,
    error::{Diagnostic, Label},
};

/// Something the CLI reports to the user.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    severity: Severity,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    source: Option<&'a str>,
}

impl<'a> Report<'a> {
    /// Report a diagnostic against the document text it points into.
    pub fn from_diagnostic(diag: &Diagnostic, source: &'a str) -> Self {
        let severity = if diag.severity().is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };

        let primary = diag
            .primary()
            .map(|label| LabeledSpan::new_primary_with_span(message(label), to_miette(label.span())));
        let related = diag
            .related_labels()
            .iter()
            .map(|label| LabeledSpan::new_with_span(message(label), to_miette(label.span())));

        Self {
            message: diag.message().to_string(),
            code: Some(diag.code().to_string()),
            severity,
            help: Some(diag.help().to_string()),
            labels: primary.into_iter().chain(related).collect(),
            source: Some(source),
        }
    }

    pub fn from_error(err: &'a TaxonError) -> Self {
        let code = match err {
            TaxonError::Parse { err, src } => return Self::from_diagnostic(err.diagnostic(), src),
            TaxonError::Io(_) => "taxon::io",
            TaxonError::Config(_) => "taxon::config",
        };
        Self {
            message: err.to_string(),
            code: Some(code.to_string()),
            severity: Severity::Error,
            help: None,
            labels: Vec::new(),
            source: None,
        }
    }

    /// Render with miette's graphical handler, falling back to the bare
    /// message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match GraphicalReportHandler::new().render_report(&mut out, self) {
            Ok(()) => out,
            Err(_) => self.message.clone(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn message(label: &Label) -> Option<String> {
    Some(label.message().to_string())
}

fn to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

#[cfg(test)]
mod tests {
    use taxon_parser::{error::ErrorCode, parse};

    use super::*;

    #[test]
    fn test_parse_error_keeps_source() {
        let src = "[A\n";
        let err = TaxonError::new_parse_error(parse(src).unwrap_err(), src);

        let report = Report::from_error(&err);
        assert_eq!(report.severity(), Some(Severity::Error));
        assert_eq!(report.code().map(|c| c.to_string()), Some("E001".to_string()));
        assert!(report.source_code().is_some());
        assert_eq!(report.labels().map(|labels| labels.count()), Some(1));
    }

    #[test]
    fn test_config_error_has_no_source() {
        let err = TaxonError::Config("bad mode".to_string());

        let report = Report::from_error(&err);
        assert_eq!(report.to_string(), "Configuration error: bad mode");
        assert_eq!(report.code().map(|c| c.to_string()), Some("taxon::config".to_string()));
        assert!(report.source_code().is_none());
        assert!(report.labels().is_none());
    }

    #[test]
    fn test_warning_labels() {
        let diag = Diagnostic::new(ErrorCode::E101, "Arc 'A.e.f' expects a Node for 'A.e'.")
            .at(Span::new(10..17), "arc declared here")
            .related(Span::new(0..5), "'A.e' is an arc");

        let report = Report::from_diagnostic(&diag, "[A.e]\n\n\n\n\n[A.e.f]\n");
        assert_eq!(report.severity(), Some(Severity::Warning));

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("'A.e' is an arc"));
        assert_eq!(labels[1].offset(), 0);
    }

    #[test]
    fn test_help_defaults_to_code() {
        let diag = Diagnostic::new(ErrorCode::E102, "Arc 'A.e' has no target.");
        let report = Report::from_diagnostic(&diag, "");

        assert_eq!(
            report.help().map(|h| h.to_string()),
            Some("add `target = \"<node name>\"`".to_string())
        );
    }

    #[test]
    fn test_render_includes_message() {
        let diag = Diagnostic::new(ErrorCode::E100, "No Node 'Z' for Arc 'Z.e'.")
            .at(Span::new(0..5), "arc declared here");

        let rendered = Report::from_diagnostic(&diag, "[Z.e]\n").render();
        assert!(rendered.contains("No Node 'Z' for Arc 'Z.e'."));
    }
}
