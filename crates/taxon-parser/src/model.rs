//! The document model: one document, its table index and its graph.

use std::cell::OnceCell;

use log::debug;

use taxon_core::{graph::Graph, path::DescendantMatch};

use crate::{
    document::Document,
    elaborate::{self, Elaborated},
    error::Diagnostic,
    table::TableIndex,
};

/// Lazily derived views of a [`Document`].
///
/// The table index and the graph are each built on first use and then
/// reused, so repeated calls always return the same values.
#[derive(Debug)]
pub struct Model<'doc> {
    document: &'doc Document,
    mode: DescendantMatch,
    tables: OnceCell<TableIndex<'doc>>,
    elaborated: OnceCell<Elaborated<'doc>>,
}

impl<'doc> Model<'doc> {
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            mode: DescendantMatch::default(),
            tables: OnceCell::new(),
            elaborated: OnceCell::new(),
        }
    }

    /// Set how [`Graph::children`] matches descendant names.
    pub fn with_descendant_match(mut self, mode: DescendantMatch) -> Self {
        self.mode = mode;
        self.elaborated = OnceCell::new();
        self
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// Every discovered table, keyed by path.
    pub fn tables(&self) -> &TableIndex<'doc> {
        self.tables.get_or_init(|| TableIndex::new(self.document))
    }

    /// The graph built from [`Model::tables`].
    pub fn graph(&self) -> &Graph<'doc> {
        self.elaborated().graph()
    }

    /// Warnings raised while building the graph.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.elaborated().diagnostics()
    }

    fn elaborated(&self) -> &Elaborated<'doc> {
        self.elaborated.get_or_init(|| {
            debug!(mode:? = self.mode; "Building graph on first use");
            elaborate::build(self.tables(), self.mode)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    const SOURCE: &str = r#"
        [A]
        [A.B]
        [A.B.e]
        target = "C"
        [C]
        [Z.e]
        target = "A"
    "#;

    #[test]
    fn test_views_are_memoised() {
        let document = Document::parse(SOURCE).unwrap();
        let model = Model::new(&document);

        assert!(ptr::eq(model.tables(), model.tables()));
        assert!(ptr::eq(model.graph(), model.graph()));
        assert_eq!(model.diagnostics().len(), 1);
        assert_eq!(model.diagnostics().len(), 1);
    }

    #[test]
    fn test_graph_contents() {
        let document = Document::parse(SOURCE).unwrap();
        let model = Model::new(&document);

        assert_eq!(model.tables().len(), 5);
        assert_eq!(model.graph().len(), 3);
        assert_eq!(model.graph().arcs().count(), 1);
        assert!(ptr::eq(model.document(), &document));
    }

    #[test]
    fn test_descendant_match_is_applied() {
        let document = Document::parse("[A]\n[AB]\n[A.C]\n").unwrap();

        let segment = Model::new(&document);
        assert_eq!(segment.graph().children("A").len(), 1);

        let prefix = Model::new(&document).with_descendant_match(DescendantMatch::Prefix);
        assert_eq!(prefix.graph().children("A").len(), 2);
        assert_eq!(prefix.graph().descendant_match(), DescendantMatch::Prefix);
    }
}
