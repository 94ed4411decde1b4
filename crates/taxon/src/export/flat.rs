//! Flat DOT layout.
//!
//! For each node, in discovery order, the exporter writes:
//!
//! 1. the vertex statement;
//! 2. a `"..."` edge to every descendant at the shallowest descendant rank,
//!    styled with the node's own weight and colors;
//! 3. one edge per arc owned by the node;
//! 4. a blank line.

use log::info;

use taxon_core::graph::{Graph, Node, VertexId};

use super::{Exporter, Heading, Lines, arc_edge, edge, vertex};

/// Label of the summary edges to a node's children.
const SKETCH_LABEL: &str = "...";

#[derive(Debug, Clone)]
pub struct FlatExporter {
    heading: Heading,
}

impl FlatExporter {
    pub fn new(heading: Heading) -> Self {
        Self { heading }
    }

    fn block(&self, graph: &Graph<'_>, id: VertexId, node: &Node<'_>) -> Vec<String> {
        let op = self.heading.edge_op();
        let mut lines = vec![vertex(id, node)];
        lines.extend(sketches(graph, id, node, op));
        lines.extend(
            node.arcs()
                .iter()
                .filter_map(|arc| arc_edge(graph, id, op, arc)),
        );
        lines.push(String::new());
        lines
    }
}

impl Exporter for FlatExporter {
    fn lines<'g>(&'g self, graph: &'g Graph<'_>) -> Lines<'g> {
        info!(nodes_count = graph.len(); "Exporting flat graph");

        let body = graph
            .vertices()
            .flat_map(move |(id, node)| self.block(graph, id, node));

        Box::new(
            self.heading
                .open()
                .into_iter()
                .chain(body)
                .chain(self.heading.close()),
        )
    }
}

/// Edges from `node` to its nearest descendants.
fn sketches(graph: &Graph<'_>, id: VertexId, node: &Node<'_>, op: &str) -> Vec<String> {
    let children = graph.children(node.name());
    let Some(nearest) = children.iter().map(|child| child.rank()).min() else {
        return Vec::new();
    };

    children
        .into_iter()
        .filter(|child| child.rank() == nearest)
        .filter_map(|child| graph.vertex_id(child.name()))
        .map(|child| edge(id, op, child, SKETCH_LABEL, node.weight(), node.colors()))
        .collect()
}

#[cfg(test)]
mod tests {
    use taxon_parser::{Model, parse};

    use super::*;

    const BLACK: &str = "color=\"#000000ff\" fontcolor=\"#000000ff\" fillcolor=\"#000000ff\"";

    fn render(source: &str, heading: Heading) -> Vec<String> {
        let document = parse(source).unwrap();
        let model = Model::new(&document);
        FlatExporter::new(heading).lines(model.graph()).collect()
    }

    #[test]
    fn test_two_roots() {
        let lines = render("[A]\n[B]\n", Heading::new("roots"));

        assert_eq!(
            lines,
            [
                "graph \"roots\" {".to_string(),
                "    label=\"roots\"".to_string(),
                String::new(),
                format!("n0 [ label=\"A\", weight=1.00 {BLACK} ]"),
                String::new(),
                format!("n1 [ label=\"B\", weight=1.00 {BLACK} ]"),
                String::new(),
                String::new(),
                "}".to_string(),
            ]
        );
        assert!(!lines.iter().any(|line| line.contains("--")));
    }

    #[test]
    fn test_sketches_reach_nearest_rank_only() {
        let lines = render(
            "[A]\nweight = 3\n[A.B.C]\n[A.D]\n[A.D.E]\n",
            Heading::new("g").with_directed(true),
        );

        let sketches: Vec<_> = lines.iter().filter(|line| line.contains("\"...\"")).collect();
        assert_eq!(
            sketches,
            [
                &format!("n0 -> n2 [ label=\"...\", weight=3.00 {BLACK} ]"),
                &format!("n2 -> n3 [ label=\"...\", weight=1.00 {BLACK} ]"),
            ]
        );
    }

    #[test]
    fn test_arcs_follow_their_node() {
        let lines = render(
            "[A]\n[A.loves]\ntarget = \"B\"\nweight = 0.5\n[B]\n",
            Heading::new("g"),
        );

        let a = lines.iter().position(|line| line.starts_with("n0 [")).unwrap();
        assert_eq!(
            lines[a + 1],
            format!("n0 -- n1 [ label=\"loves\", weight=0.50 {BLACK} ]")
        );
        assert_eq!(lines[a + 2], "");
    }

    #[test]
    fn test_unknown_target_is_skipped() {
        let lines = render("[A]\n[A.e]\ntarget = \"Nowhere\"\n[B]\n", Heading::new("g"));

        assert_eq!(lines.iter().filter(|line| line.contains("--")).count(), 0);
        assert!(lines.iter().any(|line| line.starts_with("n1 [")));
        assert_eq!(lines.last().map(String::as_str), Some("}"));
    }
}
