use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The document could not be loaded.
    Error,
    /// Part of the document was dropped or defaulted; the graph still builds.
    Warning,
}

impl Severity {
    pub fn is_warning(self) -> bool {
        self == Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Diagnostic codes, grouped by hundreds:
/// `E0xx` document, `E1xx` arc wiring, `E2xx` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// The source text is not valid TOML.
    E001,
    /// Arc table is top-level, or the path before its last segment was never
    /// declared.
    E100,
    /// The path before the arc's last segment is itself an arc table.
    E101,
    /// Arc table without a string `target`.
    E102,
    /// Attribute of the wrong type.
    E200,
    /// Color attribute that is neither a component table nor a CSS color.
    E201,
    /// Explicit `parent` that is unknown, the node itself, or a descendant.
    E202,
}

impl ErrorCode {
    pub fn severity(self) -> Severity {
        match self {
            ErrorCode::E001 => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Suggestion shown when a diagnostic carries no help of its own.
    pub fn default_help(self) -> &'static str {
        match self {
            ErrorCode::E001 => "check the table headers and `key = value` lines around here",
            ErrorCode::E100 => "declare the owning node table, or nest the arc under one",
            ErrorCode::E101 => "declare arcs directly beneath a node table",
            ErrorCode::E102 => "add `target = \"<node name>\"`",
            ErrorCode::E200 => "the default value is used instead",
            ErrorCode::E201 => "use a `{ r, g, b, a }` table or a CSS color string",
            ErrorCode::E202 => "the node is kept as a root",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
