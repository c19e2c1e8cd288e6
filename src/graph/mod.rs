//! The labeled directed multigraph the CFL-R solver saturates
//!
//! `LabeledGraph` keeps a dual adjacency index (forward and reverse, each
//! keyed first by node then by label) so that every grammar production in
//! [`crate::grammar`] can look up either side of a join in O(1) expected
//! time. See `DESIGN.md` for why this is hand-rolled rather than built on
//! top of a general-purpose graph crate.

pub mod export;
pub mod label;

pub use label::EdgeLabel;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An opaque node identifier assigned by the frontend.
///
/// Nodes denote either address-taken memory objects or value locations
/// (pointers and scalars); the solver never inspects their provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node(pub u32);

impl Node {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node(value)
    }
}

/// A single labeled edge `(src, dst, label)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub src: Node,
    pub dst: Node,
    pub label: EdgeLabel,
}

impl LabeledEdge {
    pub fn new(src: Node, dst: Node, label: EdgeLabel) -> Self {
        Self { src, dst, label }
    }
}

type LabelAdjacency = HashMap<Node, HashMap<EdgeLabel, HashSet<Node>>>;

/// A labeled directed multigraph with set semantics and dual adjacency
/// indices, saturated in place by [`crate::solver::Solver`].
#[derive(Debug, Clone, Default)]
pub struct LabeledGraph {
    /// `forward[u][l]` is the set of `v` such that `(u, v, l)` is an edge.
    forward: LabelAdjacency,
    /// `reverse[v][l]` is the set of `u` such that `(u, v, l)` is an edge.
    reverse: LabelAdjacency,
    edges: HashSet<LabeledEdge>,
    node_count: u32,
}

/// Shared empty set returned by `successors`/`predecessors` on a miss, so
/// callers get a `&HashSet<Node>` without an allocation on every lookup.
fn empty_node_set() -> &'static HashSet<Node> {
    static EMPTY: std::sync::OnceLock<HashSet<Node>> = std::sync::OnceLock::new();
    EMPTY.get_or_init(HashSet::new)
}

impl LabeledGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node id is accounted for in `node_count`, even if it never
    /// gains an edge (an isolated node the frontend still wants reported).
    pub fn ensure_node(&mut self, node: Node) {
        if node.0 >= self.node_count {
            self.node_count = node.0 + 1;
        }
    }

    /// Total distinct node ids seen, either via `ensure_node` or as an
    /// edge endpoint.
    pub fn node_count(&self) -> usize {
        self.node_count as usize
    }

    /// O(1) expected membership test.
    pub fn has_edge(&self, src: Node, dst: Node, label: EdgeLabel) -> bool {
        self.edges.contains(&LabeledEdge::new(src, dst, label))
    }

    /// Insert `(src, dst, label)` if absent. Returns whether insertion
    /// occurred. Updates both adjacency indices atomically with respect to
    /// external observers (no intermediate state is ever visible through
    /// the public API).
    pub fn add_edge(&mut self, src: Node, dst: Node, label: EdgeLabel) -> bool {
        let edge = LabeledEdge::new(src, dst, label);
        if !self.edges.insert(edge) {
            return false;
        }
        self.ensure_node(src);
        self.ensure_node(dst);
        self.forward.entry(src).or_default().entry(label).or_default().insert(dst);
        self.reverse.entry(dst).or_default().entry(label).or_default().insert(src);
        true
    }

    /// Forward adjacency of `u` restricted to `label` (empty set if none).
    pub fn successors(&self, u: Node, label: EdgeLabel) -> &HashSet<Node> {
        self.forward
            .get(&u)
            .and_then(|by_label| by_label.get(&label))
            .unwrap_or_else(|| empty_node_set())
    }

    /// Reverse adjacency of `v` restricted to `label` (empty set if none).
    pub fn predecessors(&self, v: Node, label: EdgeLabel) -> &HashSet<Node> {
        self.reverse
            .get(&v)
            .and_then(|by_label| by_label.get(&label))
            .unwrap_or_else(|| empty_node_set())
    }

    /// All edges currently in the graph. Order is unspecified but stable
    /// within a single enumeration (iteration order of the backing set).
    pub fn all_edges(&self) -> impl Iterator<Item = LabeledEdge> + '_ {
        self.edges.iter().copied()
    }

    /// Number of distinct labeled edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges restricted to a single label, as a sorted `(src, dst)` vec.
    /// Used by [`crate::result::ResultView`] and the output renderers.
    pub fn edges_with_label_sorted(&self, label: EdgeLabel) -> Vec<(Node, Node)> {
        let mut out: Vec<(Node, Node)> = self
            .edges
            .iter()
            .filter(|e| e.label == label)
            .map(|e| (e.src, e.dst))
            .collect();
        out.sort_unstable();
        out
    }
}
