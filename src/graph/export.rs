//! LabeledGraph export to DOT and JSON formats

use crate::graph::{EdgeLabel, LabeledGraph, Node};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Export a labeled graph to DOT format for Graphviz.
pub fn export_dot(graph: &LabeledGraph) -> String {
    let mut dot = String::from("digraph LabeledGraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=circle];\n\n");

    for node in 0..graph.node_count() as u32 {
        writeln!(dot, "  \"{}\";", node).ok();
    }

    dot.push('\n');
    let mut edges: Vec<_> = graph.all_edges().collect();
    edges.sort_by_key(|e| (e.src, e.dst, e.label.as_str()));
    for edge in edges {
        writeln!(
            dot,
            "  \"{}\" -> \"{}\" [label=\"{}\", color={}];",
            edge.src,
            edge.dst,
            edge.label,
            edge.label.dot_color(),
        )
        .ok();
    }

    dot.push_str("}\n");
    dot
}

/// Serializable view of a `LabeledEdge` for JSON dumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub src: u32,
    pub dst: u32,
    pub label: String,
}

/// Complete graph export for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub node_count: usize,
    pub edges: Vec<EdgeExport>,
}

/// Export the full saturated graph as a JSON-serializable structure, sorted
/// for reproducible output across runs.
pub fn export_json(graph: &LabeledGraph) -> GraphExport {
    let mut edges: Vec<_> = graph.all_edges().collect();
    edges.sort_by_key(|e| (e.src, e.dst, e.label.as_str()));

    GraphExport {
        node_count: graph.node_count(),
        edges: edges
            .into_iter()
            .map(|e| EdgeExport {
                src: e.src.0,
                dst: e.dst.0,
                label: e.label.as_str().to_string(),
            })
            .collect(),
    }
}

/// Points-to pairs rendered for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsToPair {
    pub pointer: u32,
    pub object: u32,
}

pub fn points_to_json(pairs: &[(Node, Node)]) -> Vec<PointsToPair> {
    pairs
        .iter()
        .map(|(p, o)| PointsToPair { pointer: p.0, object: o.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> Node {
        Node(id)
    }

    fn sample_graph() -> LabeledGraph {
        let mut g = LabeledGraph::new();
        g.add_edge(n(0), n(1), EdgeLabel::AddrBar);
        g.add_edge(n(0), n(1), EdgeLabel::PT);
        g
    }

    #[test]
    fn export_dot_contains_nodes_and_edges() {
        let dot = export_dot(&sample_graph());
        assert!(dot.starts_with("digraph LabeledGraph {"));
        assert!(dot.contains("\"0\" -> \"1\" [label=\"AddrBar\""));
        assert!(dot.contains("\"0\" -> \"1\" [label=\"PT\""));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn export_json_is_sorted_and_complete() {
        let export = export_json(&sample_graph());
        assert_eq!(export.node_count, 2);
        assert_eq!(export.edges.len(), 2);
        assert_eq!(export.edges[0].label, "AddrBar");
        assert_eq!(export.edges[1].label, "PT");
    }
}
