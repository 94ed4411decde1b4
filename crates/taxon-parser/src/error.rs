//! Diagnostics for document loading and graph building.
//!
//! Loading fails only when the text is not TOML ([`ErrorCode::E001`]).
//! Graph building never fails: dangling arcs and malformed attributes become
//! warnings while the offending entry is dropped or defaulted. The severity
//! of a [`Diagnostic`] follows from its code.
//!
//! ```
//! # use taxon_parser::error::{Diagnostic, ErrorCode, Severity};
//! # use taxon_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E100, "No Node 'Z' for Arc 'Z.e'.")
//!     .at(Span::new(4..9), "arc declared here");
//!
//! assert_eq!(diag.severity(), Severity::Warning);
//! assert_eq!(diag.to_string(), "warning[E100]: No Node 'Z' for Arc 'Z.e'.");
//! ```

mod code;
mod collector;
mod diagnostic;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use code::{ErrorCode, Severity};
pub use diagnostic::{Diagnostic, Label};
pub use parse_error::ParseError;
