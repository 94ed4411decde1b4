//! Node/arc classification.
//!
//! A table declares an arc when it has a `source` or a `target` key; every
//! other table declares a node. Classification happens once, producing a
//! [`TableSpec`] the graph builder matches on.
//!
//! Only `target` is read when an arc is built. `source` takes part in
//! classification and nothing else.

use crate::table::Table;

/// Keys whose presence marks a table as an arc.
pub const ARC_KEYS: [&str; 2] = ["source", "target"];

/// Returns `true` when `table` declares an arc.
pub fn is_arc(table: &toml::Table) -> bool {
    ARC_KEYS.iter().any(|key| table.contains_key(*key))
}

/// A classified table.
#[derive(Debug, Clone, Copy)]
pub enum TableSpec<'doc> {
    Node(Table<'doc>),
    Arc(Table<'doc>),
}

impl<'doc> TableSpec<'doc> {
    pub fn classify(table: Table<'doc>) -> Self {
        if is_arc(table.data()) {
            Self::Arc(table)
        } else {
            Self::Node(table)
        }
    }

    pub fn table(&self) -> Table<'doc> {
        match self {
            Self::Node(table) | Self::Arc(table) => *table,
        }
    }
}
