//! The table index: discovered header paths resolved to document tables.

use indexmap::IndexMap;
use log::{debug, trace};

use taxon_core::{path::SEPARATOR, span::Span};

use crate::document::Document;

/// A document table addressed by its dotted path.
///
/// Borrowed from the [`Document`]; never copied.
#[derive(Debug, Clone, Copy)]
pub struct Table<'doc> {
    path: &'doc str,
    data: &'doc toml::Table,
    span: Span,
}

impl<'doc> Table<'doc> {
    pub fn path(&self) -> &'doc str {
        self.path
    }

    pub fn data(&self) -> &'doc toml::Table {
        self.data
    }

    /// Span of the first header that declared this table.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Ordered mapping from table path to [`Table`].
///
/// Paths keep the order in which their headers first appear in the source.
/// Headers that do not resolve to a table are left out.
#[derive(Debug)]
pub struct TableIndex<'doc> {
    tables: IndexMap<&'doc str, Table<'doc>>,
}

impl<'doc> TableIndex<'doc> {
    /// Resolve every discovered header of `document`.
    pub fn new(document: &'doc Document) -> Self {
        let mut tables = IndexMap::new();
        for header in document.headers() {
            let path = header.path();
            if tables.contains_key(path) {
                continue;
            }
            match resolve(document.root(), path) {
                Some(data) => {
                    tables.insert(
                        path,
                        Table {
                            path,
                            data,
                            span: header.span(),
                        },
                    );
                }
                None => trace!(path; "Header does not name a table"),
            }
        }
        debug!(tables_count = tables.len(); "Tables indexed");
        Self { tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tables.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<Table<'doc>> {
        self.tables.get(path).copied()
    }

    /// Tables in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = Table<'doc>> + '_ {
        self.tables.values().copied()
    }

    /// Paths in discovery order.
    pub fn paths(&self) -> impl Iterator<Item = &'doc str> + '_ {
        self.tables.keys().copied()
    }
}

/// Walk `root` one segment at a time. Any missing or non-table segment
/// yields `None`.
fn resolve<'doc>(root: &'doc toml::Table, path: &str) -> Option<&'doc toml::Table> {
    path.split(SEPARATOR)
        .try_fold(root, |table, segment| table.get(segment)?.as_table())
}
