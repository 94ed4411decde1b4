//! The built graph: nodes, arcs and their traversals.
//!
//! A [`Graph`] is produced once per document by the parser's graph builder
//! and treated as immutable afterwards. Nodes are keyed by table path and
//! kept in table discovery order; each node owns the [`Arc`]s declared
//! beneath it.
//!
//! Two traversals are provided:
//! - [`Graph::children`]: every descendant of a name, used by the flat
//!   exporter to draw summary edges.
//! - [`Graph::subgraphs`]: a depth-first stream of [`Event`]s following parent
//!   links, used by the cluster exporter to open and close nested blocks.

use std::{fmt, vec};

use indexmap::IndexMap;
use log::trace;

use crate::{
    color::Rgba,
    path::{self, DescendantMatch},
    span::Span,
};

/// The three color attributes shared by nodes and arcs.
///
/// In DOT output `stroke` becomes `color`, `color` becomes `fontcolor` and
/// `fill` becomes `fillcolor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Colors {
    pub color: Rgba,
    pub fill: Rgba,
    pub stroke: Rgba,
}

/// An edge declared by an arc table.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    name: String,
    label: String,
    node: Option<String>,
    target: String,
    weight: f64,
    colors: Colors,
    span: Span,
}

impl Arc {
    /// Create an arc for the table at `name` pointing at `target`.
    ///
    /// The label defaults to the last path segment and the owning node to
    /// everything before it.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        let (owner, tail) = path::split_tail(&name);
        let node = (!owner.is_empty()).then(|| owner.to_string());
        let label = tail.to_string();
        Self {
            name,
            label,
            node,
            target: target.into(),
            weight: 1.0,
            colors: Colors::default(),
            span: Span::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The arc table's own path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the owning node, `None` for a top-level arc table.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// A graph vertex built from a node table.
#[derive(Debug, Clone)]
pub struct Node<'doc> {
    name: String,
    label: String,
    weight: f64,
    arcs: Vec<Arc>,
    parent: Option<String>,
    data: &'doc toml::Table,
    colors: Colors,
    span: Span,
}

impl<'doc> Node<'doc> {
    /// Create a node with default attributes for the table at `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxon_core::graph::Node;
    ///
    /// let table = toml::Table::new();
    /// let node = Node::new("test node", &table);
    /// assert_eq!(node.label(), "test node");
    /// assert_eq!(node.weight(), 1.0);
    /// assert!(node.arcs().is_empty());
    /// ```
    pub fn new(name: impl Into<String>, data: &'doc toml::Table) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            weight: 1.0,
            arcs: Vec::new(),
            parent: None,
            data,
            colors: Colors::default(),
            span: Span::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set the parent node name.
    ///
    /// The caller is responsible for naming a node that exists in the graph
    /// this node ends up in.
    pub fn set_parent(&mut self, parent: Option<String>) {
        self.parent = parent;
    }

    /// Append an arc owned by this node.
    pub fn push_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// The raw table this node was built from, unrecognised keys included.
    pub fn data(&self) -> &'doc toml::Table {
        self.data
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Depth in the tree, equal to the number of dots in the name.
    pub fn rank(&self) -> usize {
        path::rank(&self.name)
    }
}

/// Renderer-local vertex identifier: the node's position in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One step of the cluster traversal.
#[derive(Debug, Clone, Copy)]
pub enum Event<'g, 'doc> {
    /// A node with children: open a cluster for it.
    EnterCluster(&'g Node<'doc>),
    /// A leaf node.
    Vertex(&'g Node<'doc>),
    /// All children of this node have been visited: close its cluster.
    ExitCluster(&'g Node<'doc>),
}

/// Nodes keyed by name, with traversal caches.
#[derive(Debug)]
pub struct Graph<'doc> {
    nodes: IndexMap<String, Node<'doc>>,
    mode: DescendantMatch,
    /// Descendant indices per node, by `mode`.
    descendants: Vec<Vec<usize>>,
    /// Indices of nodes whose parent is the node at the same position.
    children: Vec<Vec<usize>>,
}

impl<'doc> Graph<'doc> {
    /// Create a graph from nodes in discovery order.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a node names a parent that is not in `nodes`.
    pub fn new(nodes: IndexMap<String, Node<'doc>>, mode: DescendantMatch) -> Self {
        let descendants = nodes
            .keys()
            .map(|ancestor| {
                nodes
                    .keys()
                    .enumerate()
                    .filter(|(_, name)| path::is_descendant(name, ancestor, mode))
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();

        let mut children = vec![Vec::new(); nodes.len()];
        for (idx, node) in nodes.values().enumerate() {
            if let Some(parent) = node.parent() {
                debug_assert!(
                    nodes.contains_key(parent),
                    "Node {} names missing parent {parent}",
                    node.name()
                );
                if let Some(parent_idx) = nodes.get_index_of(parent) {
                    children[parent_idx].push(idx);
                }
            }
        }

        trace!(nodes_count = nodes.len(), mode:?; "Graph caches built");

        Self {
            nodes,
            mode,
            descendants,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&Node<'doc>> {
        self.nodes.get(name)
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<'doc>> {
        self.nodes.values()
    }

    /// All nodes paired with their vertex ids, in discovery order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Node<'doc>)> {
        self.nodes
            .values()
            .enumerate()
            .map(|(idx, node)| (VertexId(idx), node))
    }

    /// Every arc paired with the node that owns it.
    pub fn arcs(&self) -> impl Iterator<Item = (&Node<'doc>, &Arc)> {
        self.nodes
            .values()
            .flat_map(|node| node.arcs().iter().map(move |arc| (node, arc)))
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Node<'doc>> {
        self.nodes.values().filter(|node| node.parent().is_none())
    }

    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.nodes.get_index_of(name).map(VertexId)
    }

    /// The matching mode used by [`Graph::children`].
    pub fn descendant_match(&self) -> DescendantMatch {
        self.mode
    }

    /// Every node other than `name` that descends from it, in node order.
    ///
    /// Known names are answered from the cache built with the graph.
    pub fn children(&self, name: &str) -> Vec<&Node<'doc>> {
        match self.nodes.get_index_of(name) {
            Some(idx) => self.descendants[idx]
                .iter()
                .map(|&child| &self.nodes[child])
                .collect(),
            None => self
                .nodes
                .values()
                .filter(|node| path::is_descendant(node.name(), name, self.mode))
                .collect(),
        }
    }

    /// Nodes whose parent is `name`.
    pub fn direct_children(&self, name: &str) -> impl Iterator<Item = &Node<'doc>> {
        self.nodes
            .get_index_of(name)
            .into_iter()
            .flat_map(|idx| self.children[idx].iter().map(|&child| &self.nodes[child]))
    }

    /// Depth-first traversal from every root.
    pub fn subgraphs(&self) -> Subgraphs<'_, 'doc> {
        let roots = self
            .nodes
            .values()
            .enumerate()
            .filter(|(_, node)| node.parent().is_none())
            .map(|(idx, _)| idx)
            .collect();
        Subgraphs::new(self, roots)
    }

    /// Depth-first traversal from the given root names.
    ///
    /// Unknown names are skipped.
    pub fn subgraphs_from<'n>(&self, roots: impl IntoIterator<Item = &'n str>) -> Subgraphs<'_, 'doc> {
        let roots = roots
            .into_iter()
            .filter_map(|name| self.nodes.get_index_of(name))
            .collect();
        Subgraphs::new(self, roots)
    }
}

struct Frame {
    owner: Option<usize>,
    pending: vec::IntoIter<usize>,
}

/// Lazy pre-order stream of [`Event`]s, see [`Graph::subgraphs`].
pub struct Subgraphs<'g, 'doc> {
    graph: &'g Graph<'doc>,
    stack: Vec<Frame>,
}

impl<'g, 'doc> Subgraphs<'g, 'doc> {
    fn new(graph: &'g Graph<'doc>, roots: Vec<usize>) -> Self {
        Self {
            graph,
            stack: vec![Frame {
                owner: None,
                pending: roots.into_iter(),
            }],
        }
    }
}

impl<'g, 'doc> Iterator for Subgraphs<'g, 'doc> {
    type Item = Event<'g, 'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        loop {
            let frame = self.stack.last_mut()?;
            match frame.pending.next() {
                Some(idx) => {
                    let node = &graph.nodes[idx];
                    let children = &graph.children[idx];
                    if children.is_empty() {
                        return Some(Event::Vertex(node));
                    }
                    self.stack.push(Frame {
                        owner: Some(idx),
                        pending: children.clone().into_iter(),
                    });
                    return Some(Event::EnterCluster(node));
                }
                None => {
                    let finished = self.stack.pop()?;
                    if let Some(owner) = finished.owner {
                        return Some(Event::ExitCluster(&graph.nodes[owner]));
                    }
                }
            }
        }
    }
}
