//! Graphviz DOT exporters.
//!
//! An [`Exporter`] turns a built [`Graph`] into a lazy stream of DOT lines.
//! Two layouts are provided:
//!
//! - [`FlatExporter`]: every vertex and edge at top level. Each node also
//!   gets `"..."` edges to its nearest descendants.
//! - [`ClusterExporter`]: interior nodes become nested
//!   `subgraph cluster_*` blocks around their children.
//!
//! Both share the [`Heading`] (graph keyword, name and label) and the
//! vertex and edge statement formats defined here.

pub mod cluster;
pub mod flat;

pub use cluster::ClusterExporter;
pub use flat::FlatExporter;

use log::warn;

use taxon_core::graph::{Arc, Colors, Graph, Node, VertexId};

/// A lazy stream of output lines, without trailing newlines.
pub type Lines<'g> = Box<dyn Iterator<Item = String> + 'g>;

/// Renders a graph as lines of text.
pub trait Exporter {
    fn lines<'g>(&'g self, graph: &'g Graph<'_>) -> Lines<'g>;
}

/// The opening statement of a DOT graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heading {
    name: String,
    label: Option<String>,
    directed: bool,
    strict: bool,
}

impl Heading {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the graph label. Defaults to the name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The edge operator matching the graph keyword.
    pub fn edge_op(&self) -> &'static str {
        if self.directed { "->" } else { "--" }
    }

    fn open(&self) -> [String; 3] {
        let strict = if self.strict { "strict " } else { "" };
        let keyword = if self.directed { "digraph" } else { "graph" };
        [
            format!("{strict}{keyword} \"{}\" {{", escape(&self.name)),
            format!("    label=\"{}\"", escape(self.label())),
            String::new(),
        ]
    }

    fn close(&self) -> [String; 2] {
        [String::new(), "}".to_string()]
    }
}

/// Escape a string for use inside a quoted DOT attribute.
pub fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// `n<i> [ label="...", weight=N.NN color=... fontcolor=... fillcolor=... ]`
fn vertex(id: VertexId, node: &Node<'_>) -> String {
    format!(
        "{id} [ label=\"{}\", weight={:.2} {} ]",
        escape(node.label()),
        node.weight(),
        color_attributes(node.colors())
    )
}

fn edge(from: VertexId, op: &str, to: VertexId, label: &str, weight: f64, colors: Colors) -> String {
    format!(
        "{from} {op} {to} [ label=\"{}\", weight={weight:.2} {} ]",
        escape(label),
        color_attributes(colors)
    )
}

/// The edge statement for `arc`, or `None` when its target is not a node.
fn arc_edge(graph: &Graph<'_>, from: VertexId, op: &str, arc: &Arc) -> Option<String> {
    let Some(to) = graph.vertex_id(arc.target()) else {
        warn!(
            arc = arc.name(),
            arc_target = arc.target();
            "No Node '{}' for Arc '{}'.", arc.target(), arc.name()
        );
        return None;
    };
    Some(edge(from, op, to, arc.label(), arc.weight(), arc.colors()))
}

fn color_attributes(colors: Colors) -> String {
    format!(
        "color=\"{}\" fontcolor=\"{}\" fillcolor=\"{}\"",
        colors.stroke.to_hex(),
        colors.color.to_hex(),
        colors.fill.to_hex()
    )
}

#[cfg(test)]
mod tests {
    use taxon_core::color::Rgba;
    use taxon_parser::{Model, parse};

    use super::*;

    #[test]
    fn test_heading_defaults() {
        let heading = Heading::new("zoo");

        assert_eq!(heading.label(), "zoo");
        assert_eq!(heading.edge_op(), "--");
        assert_eq!(heading.open(), ["graph \"zoo\" {", "    label=\"zoo\"", ""]);
        assert_eq!(heading.close(), ["", "}"]);
    }

    #[test]
    fn test_heading_strict_digraph() {
        let heading = Heading::new("zoo")
            .with_label("The \"Zoo\"")
            .with_directed(true)
            .with_strict(true);

        assert_eq!(heading.edge_op(), "->");
        assert_eq!(heading.open()[0], "strict digraph \"zoo\" {");
        assert_eq!(heading.open()[1], "    label=\"The \\\"Zoo\\\"\"");
    }

    #[test]
    fn test_vertex_statement() {
        let document = parse("[A]\nlabel = \"Say \\\"hi\\\"\"\nweight = 2\nfill = \"#ff000080\"\n").unwrap();
        let model = Model::new(&document);
        let graph = model.graph();
        let (id, node) = graph.vertices().next().unwrap();

        assert_eq!(
            vertex(id, node),
            "n0 [ label=\"Say \\\"hi\\\"\", weight=2.00 color=\"#000000ff\" fontcolor=\"#000000ff\" fillcolor=\"#ff000080\" ]"
        );
    }

    #[test]
    fn test_color_attribute_mapping() {
        let colors = Colors {
            color: Rgba::new(1, 2, 3),
            fill: Rgba::new(4, 5, 6),
            stroke: Rgba::with_alpha(7, 8, 9, 10),
        };
        assert_eq!(
            color_attributes(colors),
            "color=\"#0708090a\" fontcolor=\"#010203ff\" fillcolor=\"#040506ff\""
        );
    }

    #[test]
    fn test_arc_edge_skips_unknown_target() {
        let document = parse("[A]\n[A.e]\ntarget = \"B\"\n[A.f]\ntarget = \"A\"\n").unwrap();
        let model = Model::new(&document);
        let graph = model.graph();
        let (id, node) = graph.vertices().next().unwrap();

        assert_eq!(arc_edge(graph, id, "--", &node.arcs()[0]), None);
        assert_eq!(
            arc_edge(graph, id, "--", &node.arcs()[1]).unwrap(),
            "n0 -- n0 [ label=\"f\", weight=1.00 color=\"#000000ff\" fontcolor=\"#000000ff\" fillcolor=\"#000000ff\" ]"
        );
    }
}
