//! Clustered DOT layout.
//!
//! Walks [`Graph::subgraphs`]: a node with children opens a
//! `subgraph cluster_<name>` block, a leaf becomes a vertex statement, and
//! each block is closed once its children are written. Arcs are written
//! after the last block.

use std::iter;

use log::{info, trace};

use taxon_core::graph::{Event, Graph, Node};

use super::{Exporter, Heading, Lines, arc_edge, escape, vertex};

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct ClusterExporter {
    heading: Heading,
}

impl ClusterExporter {
    pub fn new(heading: Heading) -> Self {
        Self { heading }
    }
}

impl Exporter for ClusterExporter {
    fn lines<'g>(&'g self, graph: &'g Graph<'_>) -> Lines<'g> {
        info!(nodes_count = graph.len(); "Exporting clustered graph");

        let mut open: Vec<&Node<'_>> = Vec::new();
        let blocks = graph.subgraphs().flat_map(move |event| match event {
            Event::EnterCluster(node) => {
                let lines = enter_cluster(node, &INDENT.repeat(open.len()));
                open.push(node);
                lines
            }
            Event::Vertex(node) => graph
                .vertex_id(node.name())
                .map(|id| format!("{}{}", INDENT.repeat(open.len()), vertex(id, node)))
                .into_iter()
                .collect(),
            Event::ExitCluster(node) => {
                let closed = open.pop();
                debug_assert!(closed.is_some_and(|closed| closed.name() == node.name()));
                trace!(cluster = node.name(); "Cluster closed");
                vec![String::new(), format!("{}}}", INDENT.repeat(open.len()))]
            }
        });

        let op = self.heading.edge_op();
        let arcs = graph.vertices().flat_map(move |(id, node)| {
            node.arcs()
                .iter()
                .filter_map(move |arc| arc_edge(graph, id, op, arc))
        });

        Box::new(
            self.heading
                .open()
                .into_iter()
                .chain(blocks)
                .chain(iter::once(String::new()))
                .chain(arcs)
                .chain(self.heading.close()),
        )
    }
}

/// The lines opening a cluster block for `node`.
fn enter_cluster(node: &Node<'_>, indent: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("{indent}subgraph cluster_{} {{", cluster_id(node.name())),
        format!("{indent}{INDENT}label=\"{}\"", escape(node.label())),
        format!("{indent}{INDENT}weight={:.2}", node.weight()),
        String::new(),
    ]
}

/// Lowercase `name`, replacing anything that is not alphanumeric with `_`.
fn cluster_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
