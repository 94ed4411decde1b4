//! Built-in self-test suite, run with `taxon --test`.
//!
//! Each check loads a small document through the public API and verifies
//! one property of table discovery, graph building or rendering. Results
//! are written in a `name ... ok` style followed by a summary line.

use std::io::{self, Write};

use log::{debug, info};

use taxon::{
    GraphBuilder, Model,
    color::Rgba,
    export::{Exporter, FlatExporter, Heading},
    graph::Node,
};

type CheckResult = Result<(), String>;

struct Check {
    name: &'static str,
    run: fn() -> CheckResult,
}

const CHECKS: &[Check] = &[
    Check { name: "tables_in_source_order", run: tables_in_source_order },
    Check { name: "graphs_unique", run: graphs_unique },
    Check { name: "graphs_sublevels", run: graphs_sublevels },
    Check { name: "node_parent_root", run: node_parent_root },
    Check { name: "node_parent_tree", run: node_parent_tree },
    Check { name: "node_parent_gap", run: node_parent_gap },
    Check { name: "node_children", run: node_children },
    Check { name: "node_rank", run: node_rank },
    Check { name: "arc_labels", run: arc_labels },
    Check { name: "color_table", run: color_table },
    Check { name: "dangling_arc", run: dangling_arc },
    Check { name: "graph_is_memoised", run: graph_is_memoised },
    Check { name: "flat_two_roots", run: flat_two_roots },
];

/// Outcome of a self-test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run every check, reporting progress to `out`.
///
/// # Errors
///
/// Returns an I/O error only when writing the report fails.
pub fn run(out: &mut impl Write) -> io::Result<Summary> {
    info!(checks_count = CHECKS.len(); "Running self-test suite");

    let mut summary = Summary {
        passed: 0,
        failed: 0,
    };
    let mut failures = Vec::new();

    for check in CHECKS {
        match (check.run)() {
            Ok(()) => {
                summary.passed += 1;
                writeln!(out, "test {} ... ok", check.name)?;
            }
            Err(reason) => {
                summary.failed += 1;
                writeln!(out, "test {} ... FAILED", check.name)?;
                failures.push((check.name, reason));
            }
        }
    }

    for (name, reason) in &failures {
        writeln!(out, "\n---- {name} ----\n{reason}")?;
    }

    let status = if summary.is_success() { "ok" } else { "FAILED" };
    writeln!(
        out,
        "\ntest result: {status}. {} passed; {} failed",
        summary.passed, summary.failed
    )?;

    debug!(passed = summary.passed, failed = summary.failed; "Self-test finished");
    Ok(summary)
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> CheckResult {
    if condition { Ok(()) } else { Err(message()) }
}

fn ensure_eq<T: PartialEq + std::fmt::Debug>(left: T, right: T) -> CheckResult {
    ensure(left == right, || format!("expected {right:?}, found {left:?}"))
}

/// Parse `source` and hand its model to `check`.
fn with_model(source: &str, check: impl FnOnce(&Model<'_>) -> CheckResult) -> CheckResult {
    let builder = GraphBuilder::default();
    let document = builder.parse(source).map_err(|err| err.to_string())?;
    check(&builder.model(&document))
}

fn parent<'m>(model: &'m Model<'_>, name: &str) -> Result<Option<&'m str>, String> {
    model
        .graph()
        .node(name)
        .map(Node::parent)
        .ok_or_else(|| format!("no node {name}"))
}

fn tables_in_source_order() -> CheckResult {
    with_model("[A]\ntag = 1\n\n[A.B.C]\ntag = 1\n\n[  D ]\n", |model| {
        ensure_eq(model.tables().paths().collect::<Vec<_>>(), vec!["A", "A.B.C", "D"])
    })
}

fn graphs_unique() -> CheckResult {
    with_model("[A]\ngraphs = [\"a\", \"b\"]\n[B]\n[C]\ngraphs = [\"a\"]\n", |model| {
        let graphs: Vec<_> = model.document().graphs().into_iter().collect();
        ensure_eq(graphs, vec!["a".to_string(), "b".to_string()])
    })
}

fn graphs_sublevels() -> CheckResult {
    with_model("[A]\ngraphs = [\"a\"]\n[A.B]\ngraphs = [\"b\"]\n", |model| {
        ensure_eq(model.document().graphs().len(), 2)
    })
}

fn node_parent_root() -> CheckResult {
    with_model("[A]\n[B]\n", |model| {
        ensure_eq(model.graph().len(), 2)?;
        ensure_eq(model.graph().roots().count(), 2)
    })
}

fn node_parent_tree() -> CheckResult {
    with_model("[A]\n[A.B]\n[C]\n[C.B]\n", |model| {
        ensure_eq(parent(model, "A.B")?, Some("A"))?;
        ensure_eq(parent(model, "C.B")?, Some("C"))
    })
}

fn node_parent_gap() -> CheckResult {
    with_model("[A]\n[C.B.C]\n[C]\n[A.B.C]\n", |model| {
        ensure_eq(parent(model, "A.B.C")?, Some("A"))?;
        ensure_eq(parent(model, "C.B.C")?, Some("C"))
    })
}

fn node_children() -> CheckResult {
    with_model("[A]\n[C.B.C]\n[C]\n[A.B.C]\n", |model| {
        let children: Vec<_> = model.graph().children("A").into_iter().map(Node::name).collect();
        ensure_eq(children, vec!["A.B.C"])
    })
}

fn node_rank() -> CheckResult {
    with_model("[A]\n[C.B.C]\n[C]\n[A.B.C]\n", |model| {
        let rank = |name| model.graph().node(name).map(Node::rank);
        ensure_eq(rank("A"), Some(0))?;
        ensure_eq(rank("A.B.C"), Some(2))
    })
}

fn arc_labels() -> CheckResult {
    with_model("[A.B]\n[A.B.c]\ntarget = \"C\"\n[C]\n[C.ab]\ntarget = \"A.B\"\n", |model| {
        let arcs = |name| model.graph().node(name).map(|node| node.arcs().len());
        ensure_eq(model.graph().len(), 2)?;
        ensure_eq(arcs("A.B"), Some(1))?;
        ensure_eq(arcs("C"), Some(1))
    })
}

fn color_table() -> CheckResult {
    with_model("[A]\n[A.color]\nr = 10\ng = 20\nb = 30\n", |model| {
        let color = model.graph().node("A").map(|node| node.colors().color);
        ensure_eq(color, Some(Rgba::with_alpha(10, 20, 30, 255)))
    })
}

fn dangling_arc() -> CheckResult {
    with_model("[A]\n[Z.e]\ntarget = \"A\"\n", |model| {
        ensure_eq(model.graph().arcs().count(), 0)?;
        ensure(
            model
                .diagnostics()
                .iter()
                .any(|diag| diag.message() == "No Node 'Z' for Arc 'Z.e'."),
            || "missing dangling arc warning".to_string(),
        )
    })
}

fn graph_is_memoised() -> CheckResult {
    with_model("[A]\n[A.B]\n", |model| {
        ensure(std::ptr::eq(model.graph(), model.graph()), || {
            "graph was rebuilt".to_string()
        })
    })
}

fn flat_two_roots() -> CheckResult {
    with_model("[A]\n[B]\n", |model| {
        let exporter = FlatExporter::new(Heading::new("roots"));
        let lines: Vec<_> = exporter.lines(model.graph()).collect();
        let vertices = lines.iter().filter(|line| line.starts_with('n')).count();
        let edges = lines.iter().filter(|line| line.contains(" -- ")).count();
        ensure_eq((vertices, edges), (2, 0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        let mut out = Vec::new();
        let summary = run(&mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(summary.is_success(), "{report}");
        assert_eq!(summary.passed, CHECKS.len());
        assert!(report.contains("test node_parent_gap ... ok"));
        assert!(report.ends_with("test result: ok. 13 passed; 0 failed\n"));
    }

    #[test]
    fn test_ensure_eq_reports_values() {
        assert_eq!(ensure_eq(1, 2), Err("expected 2, found 1".to_string()));
    }
}
