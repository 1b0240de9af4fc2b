//! Graphviz export — write a constraint graph as a DOT digraph.
//!
//! ```text
//! ConstraintGraph → export_dot() → digraph { ... }
//!   → dot -Tsvg graph.dot > graph.svg
//! ```
//!
//! States are written in classification priority order and labelled with
//! their priority rank; edges are labelled with their name.

use std::io::Write;

use crate::graph::ConstraintGraph;
use crate::Result;

pub fn export_dot(graph: &ConstraintGraph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "// manip-graph DOT export")?;
    writeln!(writer, "// States: {}", graph.states().len())?;
    writeln!(writer, "// Edges: {}", graph.edges().len())?;
    writeln!(writer, "digraph \"{}\" {{", escape(graph.name()))?;

    for (rank, id) in graph.selector().states().iter().enumerate() {
        let name = escape(graph.state_name(*id));
        writeln!(writer, "  {} [label=\"{} (#{})\"];", id, name, rank)?;
    }

    for edge in graph.edges() {
        writeln!(
            writer,
            "  {} -> {} [label=\"{}\"];",
            edge.from,
            edge.to,
            escape(&edge.name)
        )?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ConstraintSet, LockedJoint};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_pick_place() {
        let mut graph = ConstraintGraph::new("pick \"n\" place");
        let grasped = graph.add_state("grasped", ConstraintSet::new("g").with(LockedJoint::new(1, 1.0)));
        let free = graph.add_state("free", ConstraintSet::new("f"));
        graph.add_edge("pick", free, grasped, ConstraintSet::new("pick")).unwrap();
        graph.add_edge("place", grasped, free, ConstraintSet::new("place")).unwrap();

        let mut out = Vec::new();
        export_dot(&graph, &mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert_eq!(
            dot,
            "// manip-graph DOT export\n\
             // States: 2\n\
             // Edges: 2\n\
             digraph \"pick \\\"n\\\" place\" {\n  \
             s0 [label=\"grasped (#0)\"];\n  \
             s1 [label=\"free (#1)\"];\n  \
             s1 -> s0 [label=\"pick\"];\n  \
             s0 -> s1 [label=\"place\"];\n\
             }\n"
        );
    }
}
