//! The error type returned by [`crate::GraphBuilder`].
//!
//! Graph-building problems are not errors: they are warnings carried by the
//! [`crate::Model`]. Only I/O, invalid TOML and configuration problems stop a run.

use std::io;

use thiserror::Error;

use taxon_parser::error::ParseError;

#[derive(Debug, Error)]
pub enum TaxonError {
    /// Reading a document or writing DOT text failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid TOML. The text is kept for snippet rendering.
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// A configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaxonError {
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_displays_diagnostic() {
        let err = taxon_parser::parse("[A\n").unwrap_err();
        let err = TaxonError::new_parse_error(err, "[A\n");

        assert!(err.to_string().starts_with("error[E001]: invalid document"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: TaxonError = io::Error::new(io::ErrorKind::NotFound, "absent.toml").into();
        assert_eq!(err.to_string(), "I/O error: absent.toml");
    }
}
