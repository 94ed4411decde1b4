//! Graph building: classified tables to [`Graph`].
//!
//! The builder runs in three passes over the table index:
//!
//! 1. every node table becomes a [`Node`] carrying its decoded attributes;
//! 2. each node is attached to its nearest declared ancestor, found by
//!    walking its dotted path from the longest prefix to the shortest
//!    (undeclared intermediate paths are skipped over);
//! 3. every arc table becomes an [`Arc`] appended to the node named by its
//!    path minus the last segment.
//!
//! Nothing here fails. Problems are reported as warnings and the offending
//! attribute falls back to its default, or the offending arc is dropped.

use indexmap::IndexMap;
use log::{debug, info};

use taxon_core::{
    color::Rgba,
    graph::{Arc, Colors, Graph, Node},
    path::{self, DescendantMatch},
    span::Span,
};

use crate::{
    attributes::{self, AttributeError},
    classify::TableSpec,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    table::{Table, TableIndex},
};

/// The result of graph building: the graph and the warnings raised.
#[derive(Debug)]
pub struct Elaborated<'doc> {
    graph: Graph<'doc>,
    diagnostics: Vec<Diagnostic>,
}

impl<'doc> Elaborated<'doc> {
    pub fn graph(&self) -> &Graph<'doc> {
        &self.graph
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Graph<'doc>, Vec<Diagnostic>) {
        (self.graph, self.diagnostics)
    }
}

/// Build the graph for every table in `index`.
pub fn build<'doc>(index: &TableIndex<'doc>, mode: DescendantMatch) -> Elaborated<'doc> {
    Builder::new(index).build(mode)
}

struct Builder<'a, 'doc> {
    index: &'a TableIndex<'doc>,
    diagnostics: DiagnosticCollector,
}

impl<'a, 'doc> Builder<'a, 'doc> {
    fn new(index: &'a TableIndex<'doc>) -> Self {
        Self {
            index,
            diagnostics: DiagnosticCollector::default(),
        }
    }

    fn build(mut self, mode: DescendantMatch) -> Elaborated<'doc> {
        info!(tables_count = self.index.len(); "Building graph");

        let mut node_tables = Vec::new();
        let mut arc_tables = Vec::new();
        for spec in self.index.iter().map(TableSpec::classify) {
            match spec {
                TableSpec::Node(table) => node_tables.push(table),
                TableSpec::Arc(table) => arc_tables.push(table),
            }
        }

        let mut nodes = IndexMap::with_capacity(node_tables.len());
        for table in node_tables {
            let node = self.node(table);
            nodes.insert(table.path().to_string(), node);
        }

        self.resolve_parents(&mut nodes);
        self.resolve_explicit_parents(&mut nodes);

        let mut arcs_count = 0;
        for table in arc_tables {
            if self.attach_arc(&mut nodes, table) {
                arcs_count += 1;
            }
        }

        debug!(
            nodes_count = nodes.len(),
            arcs_count,
            warnings_count = self.diagnostics.len();
            "Graph built"
        );

        Elaborated {
            graph: Graph::new(nodes, mode),
            diagnostics: self.diagnostics.finish(),
        }
    }

    fn node(&mut self, table: Table<'doc>) -> Node<'doc> {
        let (name, span, data) = (table.path(), table.span(), table.data());
        let mut node = Node::new(name, data).with_span(span);

        let label = attributes::string(data, attributes::LABEL);
        if let Some(label) = self.decoded(name, span, label) {
            node = node.with_label(label);
        }
        let weight = attributes::number(data, attributes::WEIGHT);
        if let Some(weight) = self.decoded(name, span, weight) {
            node = node.with_weight(weight);
        }
        if data.contains_key(attributes::ARCS) {
            debug!(node = name; "Ignoring `arcs` key, arcs come from arc tables");
        }

        node.with_colors(self.colors(table))
    }

    fn colors(&mut self, table: Table<'doc>) -> Colors {
        let mut colors = Colors::default();
        let slots: [(&'static str, &mut Rgba); 3] = [
            (attributes::COLOR, &mut colors.color),
            (attributes::FILL, &mut colors.fill),
            (attributes::STROKE, &mut colors.stroke),
        ];
        for (key, slot) in slots {
            let decoded = attributes::color(table.data(), key);
            if let Some(color) = self.decoded(table.path(), table.span(), decoded) {
                *slot = color;
            }
        }
        colors
    }

    /// Attach every node to its nearest declared ancestor.
    fn resolve_parents(&mut self, nodes: &mut IndexMap<String, Node<'doc>>) {
        let parents: Vec<Option<String>> = nodes
            .keys()
            .map(|name| {
                path::ancestors(name)
                    .find(|ancestor| nodes.contains_key(*ancestor))
                    .map(str::to_string)
            })
            .collect();

        for (node, parent) in nodes.values_mut().zip(parents) {
            node.set_parent(parent);
        }
    }

    /// Honour `parent = "..."` on nodes that have no dotted ancestor.
    fn resolve_explicit_parents(&mut self, nodes: &mut IndexMap<String, Node<'doc>>) {
        for idx in 0..nodes.len() {
            let node = &nodes[idx];
            if node.parent().is_some() {
                continue;
            }
            let (name, span, data) = (node.name().to_string(), node.span(), node.data());
            let explicit = attributes::string(data, attributes::PARENT);
            let Some(parent) = self.decoded(&name, span, explicit) else {
                continue;
            };

            match explicit_parent_problem(nodes, &name, parent) {
                None => nodes[idx].set_parent(Some(parent.to_string())),
                Some(reason) => {
                    self.diagnostics.emit(
                        Diagnostic::new(
                            ErrorCode::E202,
                            format!("Node '{name}' cannot have parent '{parent}': {reason}."),
                        )
                        .at(span, "node declared here"),
                    );
                }
            }
        }
    }

    /// Build the arc for `table` and append it to its owner.
    ///
    /// Returns `false` when the arc was dropped.
    fn attach_arc(
        &mut self,
        nodes: &mut IndexMap<String, Node<'doc>>,
        table: Table<'doc>,
    ) -> bool {
        let (name, span, data) = (table.path(), table.span(), table.data());

        let Ok(Some(target)) = attributes::string(data, attributes::TARGET) else {
            self.diagnostics.emit(
                Diagnostic::new(ErrorCode::E102, format!("Arc '{name}' has no target."))
                    .at(span, "arc declared here"),
            );
            return false;
        };

        let mut arc = Arc::new(name, target).with_span(span);
        let label = attributes::string(data, attributes::LABEL);
        if let Some(label) = self.decoded(name, span, label) {
            arc = arc.with_label(label);
        }
        let weight = attributes::number(data, attributes::WEIGHT);
        if let Some(weight) = self.decoded(name, span, weight) {
            arc = arc.with_weight(weight);
        }
        let arc = arc.with_colors(self.colors(table));

        let (owner, _) = path::split_tail(name);
        if let Some(node) = nodes.get_mut(owner) {
            node.push_arc(arc);
            return true;
        }

        let diagnostic = match self.index.get(owner) {
            Some(owner_table) => {
                Diagnostic::new(
                    ErrorCode::E101,
                    format!("Arc '{name}' expects a Node for '{owner}'."),
                )
                .at(span, "arc declared here")
                .related(owner_table.span(), format!("'{owner}' is an arc"))
            }
            None => {
                let diagnostic =
                    Diagnostic::new(ErrorCode::E100, format!("No Node '{owner}' for Arc '{name}'."))
                        .at(span, "arc declared here");
                if owner.is_empty() {
                    diagnostic.with_help("top-level tables cannot be arcs")
                } else {
                    diagnostic.with_help(format!("declare a `[{owner}]` table"))
                }
            }
        };
        self.diagnostics.emit(diagnostic);
        false
    }

    /// Unwrap a decoded attribute, reporting a warning when it is invalid.
    fn decoded<T>(
        &mut self,
        owner: &str,
        span: Span,
        result: Result<Option<T>, AttributeError>,
    ) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(err) => {
                let code = match err {
                    AttributeError::Type { .. } => ErrorCode::E200,
                    AttributeError::Color { .. } => ErrorCode::E201,
                };
                self.diagnostics.emit(
                    Diagnostic::new(code, format!("Table '{owner}' has an invalid attribute: {err}"))
                        .at(span, "declared here"),
                );
                None
            }
        }
    }
}

/// Why `parent` cannot become the explicit parent of `name`, if it cannot.
fn explicit_parent_problem(
    nodes: &IndexMap<String, Node<'_>>,
    name: &str,
    parent: &str,
) -> Option<String> {
    if parent == name {
        return Some("a node cannot be its own parent".to_string());
    }
    if !nodes.contains_key(parent) {
        return Some(format!("there is no node '{parent}'"));
    }
    let mut current = Some(parent);
    while let Some(ancestor) = current {
        if ancestor == name {
            return Some(format!("'{parent}' already descends from '{name}'"));
        }
        current = nodes.get(ancestor).and_then(Node::parent);
    }
    None
}
