//! A read-only view over a saturated graph's points-to facts
//!
//! `ResultView` borrows a [`LabeledGraph`] after [`crate::solver::Solver::solve`]
//! has run and answers points-to queries directly off the `PT` label, with no
//! further computation.

use crate::graph::{EdgeLabel, LabeledGraph, Node};
use std::collections::HashSet;

/// Queries the `PT` edges of a saturated [`LabeledGraph`].
pub struct ResultView<'g> {
    graph: &'g LabeledGraph,
}

impl<'g> ResultView<'g> {
    pub fn new(graph: &'g LabeledGraph) -> Self {
        Self { graph }
    }

    /// Every `(pointer, object)` pair with a `PT` edge in the saturated
    /// graph; no duplicates, order unspecified but deterministic per
    /// invocation (iteration order of the backing edge set). Callers
    /// wanting a stable order should use [`ResultView::points_to_sorted`].
    pub fn points_to(&self) -> impl Iterator<Item = (Node, Node)> + 'g {
        self.graph.all_edges().filter(|e| e.label == EdgeLabel::PT).map(|e| (e.src, e.dst))
    }

    /// All `(pointer, object)` pairs from the `PT` relation, sorted for
    /// reproducible output.
    pub fn points_to_sorted(&self) -> Vec<(Node, Node)> {
        self.graph.edges_with_label_sorted(EdgeLabel::PT)
    }

    /// The points-to set of `pointer`: every `z` such that `PT(pointer, z)`
    /// holds, i.e. `successors(pointer, PT)`.
    pub fn pointees(&self, pointer: Node) -> &'g HashSet<Node> {
        self.graph.successors(pointer, EdgeLabel::PT)
    }
}
