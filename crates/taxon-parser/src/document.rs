//! The loaded document: source text, TOML tree and discovered headers.

use std::collections::BTreeSet;

use log::{debug, info};

use taxon_core::span::Span;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    header::{self, Header},
};

/// Key under which tables list the graphs they belong to.
const GRAPHS_KEY: &str = "graphs";

/// A parsed document. Immutable after [`Document::parse`].
#[derive(Debug)]
pub struct Document {
    source: String,
    root: toml::Table,
    headers: Vec<Header>,
}

impl Document {
    /// Parse TOML source text and discover its table headers.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying one `E001` diagnostic, labelled at
    /// the offending location, when the text is not valid TOML.
    pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();
        info!(source_len = source.len(); "Parsing document");

        let root = source.parse::<toml::Table>().map_err(|err| {
            let span = err.span().map(Span::new).unwrap_or_default();
            Diagnostic::new(
                ErrorCode::E001,
                format!("invalid document: {}", err.message().trim_end()),
            )
            .at(span, "here")
        })?;

        let headers = header::scan(&source);
        debug!(headers_count = headers.len(); "Headers discovered");

        Ok(Self {
            source,
            root,
            headers,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &toml::Table {
        &self.root
    }

    /// Headers in source order, including ones that do not name a table.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Names listed under any `graphs` key in the document.
    ///
    /// A `graphs` value is a string or an array of strings. Nested tables
    /// are searched recursively; other value types are ignored.
    pub fn graphs(&self) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        collect_graphs(&self.root, &mut found);
        found
    }
}

fn collect_graphs(table: &toml::Table, found: &mut BTreeSet<String>) {
    for (key, value) in table {
        match value {
            toml::Value::Table(nested) if !nested.is_empty() => collect_graphs(nested, found),
            _ if key != GRAPHS_KEY => {}
            toml::Value::String(name) => {
                found.insert(name.clone());
            }
            toml::Value::Array(items) => {
                found.extend(items.iter().filter_map(|item| item.as_str()).map(str::to_string));
            }
            _ => {}
        }
    }
}
