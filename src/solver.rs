//! The CFL-R fixpoint engine
//!
//! [`Solver::solve`] drains the worklist, applying unary and binary
//! productions to every popped edge from both sides (it might be either
//! operand of a future join), until the graph is saturated.

use crate::grammar::Grammar;
use crate::graph::{EdgeLabel, LabeledEdge, LabeledGraph, Node};
use crate::worklist::Worklist;
use serde::Serialize;
use tracing::{debug, trace};

/// Counters surfaced for logging and the `stats` CLI command. Not part of
/// the CFL-R semantics — purely observational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SolverStats {
    pub edges_seeded: usize,
    pub edges_derived: usize,
    pub pops: usize,
}

/// Owns a [`LabeledGraph`] and saturates it under the fixed grammar.
pub struct Solver {
    graph: LabeledGraph,
    worklist: Worklist,
    grammar: Grammar,
    stats: SolverStats,
}

impl Solver {
    pub fn new(graph: LabeledGraph) -> Self {
        Self {
            graph,
            worklist: Worklist::new(),
            grammar: Grammar::new(),
            stats: SolverStats::default(),
        }
    }

    /// Run to quiescence. Terminates because the edge universe is finite
    /// (|V|^2 * |Labels|) and the graph only ever grows.
    pub fn solve(&mut self) {
        let span = tracing::info_span!("solve", nodes = self.graph.node_count());
        let _enter = span.enter();

        self.seed();
        debug!(edges = self.stats.edges_seeded, "seeded worklist");

        while let Some(edge) = self.worklist.pop() {
            self.stats.pops += 1;
            trace!(?edge, "processing edge");
            self.apply_unary(edge);
            self.apply_right_match(edge);
            self.apply_left_match(edge);
        }

        debug!(
            edges_seeded = self.stats.edges_seeded,
            edges_derived = self.stats.edges_derived,
            pops = self.stats.pops,
            total_edges = self.graph.len(),
            "solver reached quiescence"
        );
    }

    /// Enumerate all initial edges and push each onto the worklist.
    fn seed(&mut self) {
        let initial: Vec<LabeledEdge> = self.graph.all_edges().collect();
        self.stats.edges_seeded = initial.len();
        for edge in initial {
            self.worklist.push(edge);
        }
    }

    /// Unary match: `AddrBar -> PT`.
    fn apply_unary(&mut self, edge: LabeledEdge) {
        if let Some(result) = self.grammar.unary(edge.label) {
            self.insert_with_symmetry(edge.src, edge.dst, result);
        }
    }

    /// Current edge is the LEFT operand of a binary production: consult
    /// `successors(dst, other_label)` for each matching rule.
    fn apply_right_match(&mut self, edge: LabeledEdge) {
        for &(other_label, result) in self.grammar.right_matches(edge.label) {
            let targets: Vec<Node> = self.graph.successors(edge.dst, other_label).iter().copied().collect();
            for w in targets {
                self.insert_with_symmetry(edge.src, w, result);
            }
        }
    }

    /// Current edge is the RIGHT operand of a binary production: consult
    /// `predecessors(src, other_label)` for each matching rule.
    fn apply_left_match(&mut self, edge: LabeledEdge) {
        for &(other_label, result) in self.grammar.left_matches(edge.label) {
            let sources: Vec<Node> = self.graph.predecessors(edge.src, other_label).iter().copied().collect();
            for w in sources {
                self.insert_with_symmetry(w, edge.dst, result);
            }
        }
    }

    /// Insert `(u, v, label)`, enqueueing it and — for `PT`/`Copy` — its
    /// symmetric inverse, unless the edge already exists. No other labels
    /// induce automatic inverse insertion by the solver; `AddrBar`'s
    /// inverse is the frontend's responsibility (see `DESIGN.md`).
    fn insert_with_symmetry(&mut self, u: Node, v: Node, label: EdgeLabel) {
        if !self.graph.add_edge(u, v, label) {
            return;
        }
        self.stats.edges_derived += 1;
        self.worklist.push(LabeledEdge::new(u, v, label));

        let inverse_label = match label {
            EdgeLabel::PT => Some(EdgeLabel::PTBar),
            EdgeLabel::Copy => Some(EdgeLabel::CopyBar),
            _ => None,
        };
        if let Some(inverse_label) = inverse_label {
            if self.graph.add_edge(v, u, inverse_label) {
                self.stats.edges_derived += 1;
                self.worklist.push(LabeledEdge::new(v, u, inverse_label));
            }
        }
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn graph(&self) -> &LabeledGraph {
        &self.graph
    }

    pub fn into_graph(self) -> LabeledGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> Node {
        Node(id)
    }

    fn solved(build: impl FnOnce(&mut LabeledGraph)) -> LabeledGraph {
        let mut g = LabeledGraph::new();
        build(&mut g);
        let mut solver = Solver::new(g);
        solver.solve();
        solver.into_graph()
    }

    /// S1 — simple address + copy ("p = &a; q = p;" — q copies p, so q picks
    /// up p's pointee too). Copy(p, q) is the source->target edge for "q = p";
    /// see DESIGN.md for why the copy direction is named this way round.
    #[test]
    fn s1_simple_address_and_copy() {
        let g = solved(|g| {
            g.add_edge(n(1), n(0), EdgeLabel::AddrBar); // p=1 -> a=0
            g.add_edge(n(1), n(2), EdgeLabel::Copy); // Copy(p, q): q = p
            g.add_edge(n(2), n(1), EdgeLabel::CopyBar);
        });

        let pt = g.edges_with_label_sorted(EdgeLabel::PT);
        assert_eq!(pt, vec![(n(1), n(0)), (n(2), n(0))]);
    }

    /// S2 — store/load through object
    #[test]
    fn s2_store_load_through_object() {
        // p=0, q=1, o=2, x=3, y=4
        let g = solved(|g| {
            g.add_edge(n(0), n(2), EdgeLabel::AddrBar); // p -> o
            g.add_edge(n(1), n(2), EdgeLabel::AddrBar); // q -> o
            g.add_edge(n(3), n(0), EdgeLabel::Store); // *p = x: edge x->p
            g.add_edge(n(1), n(4), EdgeLabel::Load); // y = *q: edge q->y
        });

        let pt = g.edges_with_label_sorted(EdgeLabel::PT);
        assert_eq!(pt, vec![(n(0), n(2)), (n(1), n(2))]);

        assert!(g.has_edge(n(3), n(4), EdgeLabel::Copy));
        assert!(g.has_edge(n(4), n(3), EdgeLabel::CopyBar));
    }

    /// S3 — transitive copies
    #[test]
    fn s3_transitive_copies() {
        // a=0, b=1, c=2, obj=3
        let g = solved(|g| {
            g.add_edge(n(0), n(3), EdgeLabel::AddrBar);
            g.add_edge(n(0), n(1), EdgeLabel::Copy); // b = a: edge a->b
            g.add_edge(n(1), n(0), EdgeLabel::CopyBar);
            g.add_edge(n(1), n(2), EdgeLabel::Copy); // c = b: edge b->c
            g.add_edge(n(2), n(1), EdgeLabel::CopyBar);
        });

        let pt = g.edges_with_label_sorted(EdgeLabel::PT);
        assert_eq!(pt, vec![(n(0), n(3)), (n(1), n(3)), (n(2), n(3))]);
    }

    /// S4 — empty graph
    #[test]
    fn s4_empty_graph_terminates_immediately() {
        let g = solved(|_| {});
        assert!(g.is_empty());
        assert!(g.edges_with_label_sorted(EdgeLabel::PT).is_empty());
    }

    /// S5 — cycle
    #[test]
    fn s5_cycle() {
        // p=0, q=1, o1=2, o2=3
        let g = solved(|g| {
            g.add_edge(n(0), n(2), EdgeLabel::AddrBar);
            g.add_edge(n(1), n(3), EdgeLabel::AddrBar);
            g.add_edge(n(0), n(1), EdgeLabel::Copy); // q = p: edge p->q
            g.add_edge(n(1), n(0), EdgeLabel::CopyBar);
            g.add_edge(n(1), n(0), EdgeLabel::Copy); // p = q: edge q->p
            g.add_edge(n(0), n(1), EdgeLabel::CopyBar);
        });

        let pt = g.edges_with_label_sorted(EdgeLabel::PT);
        assert_eq!(
            pt,
            vec![(n(0), n(2)), (n(0), n(3)), (n(1), n(2)), (n(1), n(3))]
        );
    }

    /// S6 — self store/load
    #[test]
    fn s6_self_store_load() {
        // p=0, o=1, r=2
        let g = solved(|g| {
            g.add_edge(n(0), n(1), EdgeLabel::AddrBar); // p -> o
            g.add_edge(n(0), n(0), EdgeLabel::Store); // *p = p: edge p->p
            g.add_edge(n(0), n(2), EdgeLabel::Load); // r = *p: edge p->r
        });

        assert!(g.has_edge(n(0), n(1), EdgeLabel::PT));
        assert!(g.has_edge(n(0), n(2), EdgeLabel::Copy));
        assert!(g.has_edge(n(2), n(1), EdgeLabel::PT));
    }

    #[test]
    fn closure_holds_for_every_binary_production_at_quiescence() {
        let g = solved(|g| {
            g.add_edge(n(0), n(2), EdgeLabel::AddrBar);
            g.add_edge(n(1), n(2), EdgeLabel::AddrBar);
            g.add_edge(n(3), n(0), EdgeLabel::Store);
            g.add_edge(n(1), n(4), EdgeLabel::Load);
        });

        let grammar = Grammar::new();
        for edge in g.all_edges() {
            for &(other, result) in grammar.right_matches(edge.label) {
                for &w in g.successors(edge.dst, other) {
                    assert!(
                        g.has_edge(edge.src, w, result),
                        "missing closure edge ({:?},{:?},{:?})",
                        edge.src,
                        w,
                        result
                    );
                }
            }
        }
    }

    #[test]
    fn solving_twice_is_idempotent_and_deterministic() {
        let build = |g: &mut LabeledGraph| {
            g.add_edge(n(0), n(3), EdgeLabel::AddrBar);
            g.add_edge(n(0), n(1), EdgeLabel::Copy);
            g.add_edge(n(1), n(0), EdgeLabel::CopyBar);
            g.add_edge(n(1), n(2), EdgeLabel::Copy);
            g.add_edge(n(2), n(1), EdgeLabel::CopyBar);
        };
        let first = solved(build);
        let second = solved(build);
        let mut a: Vec<_> = first.all_edges().collect();
        let mut b: Vec<_> = second.all_edges().collect();
        a.sort_by_key(|e| (e.src, e.dst, e.label.as_str()));
        b.sort_by_key(|e| (e.src, e.dst, e.label.as_str()));
        assert_eq!(a, b);
    }

    #[test]
    fn no_duplicate_triples_after_saturation() {
        let g = solved(|g| {
            g.add_edge(n(0), n(3), EdgeLabel::AddrBar);
            g.add_edge(n(0), n(1), EdgeLabel::Copy);
            g.add_edge(n(1), n(0), EdgeLabel::CopyBar);
        });
        let edges: Vec<_> = g.all_edges().collect();
        let unique: std::collections::HashSet<_> = edges.iter().copied().collect();
        assert_eq!(edges.len(), unique.len());
    }
}
