//! Bundled pointer-assignment-graph (PAG) frontends
//!
//! The solver itself is agnostic to where edges come from; these frontends
//! exist so the `cflr` binary has a real input format to drive. Two forms
//! are accepted: a small text grammar and an equivalent JSON form. Both
//! resolve names (or bare integers) to dense [`Node`] ids on first
//! occurrence and produce an unsaturated [`LabeledGraph`] ready for
//! [`crate::solver::Solver`].
//!
//! Text grammar, one statement per line, blank lines and `#`-comments
//! ignored:
//!
//! ```text
//! p = &a   # address-of: p points to a
//! p = q    # copy: p = q
//! *p = q   # store: store q into whatever p points to
//! r = *p   # load: load through p into r
//! ```

use crate::graph::{EdgeLabel, LabeledGraph, Node};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("line {line}: unrecognized statement form: {text:?}")]
    UnknownStatement { line: usize, text: String },

    #[error("line {line}: malformed statement: {reason}")]
    MalformedStatement { line: usize, reason: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single parsed statement, in terms of raw operand names, before
/// resolution to dense node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Statement {
    /// `dst = &src`
    Addr { dst: String, src: String },
    /// `dst = src`
    Copy { dst: String, src: String },
    /// `*ptr = value`
    Store { ptr: String, value: String },
    /// `dst = *ptr`
    Load { dst: String, ptr: String },
}

/// Assigns dense ids to operand names on first occurrence.
#[derive(Debug, Default)]
struct NodeTable {
    ids: HashMap<String, Node>,
    next: u32,
}

impl NodeTable {
    fn resolve(&mut self, name: &str) -> Node {
        if let Some(&node) = self.ids.get(name) {
            return node;
        }
        let node = Node(self.next);
        self.next += 1;
        self.ids.insert(name.to_string(), node);
        node
    }
}

/// Parse the bundled text grammar into an unsaturated [`LabeledGraph`].
pub fn parse_text(input: &str) -> Result<LabeledGraph, FrontendError> {
    let mut statements = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        statements.push(parse_text_line(line_no, line)?);
    }
    Ok(build_graph(&statements))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_text_line(line_no: usize, line: &str) -> Result<Statement, FrontendError> {
    let (lhs, rhs) = line.split_once('=').ok_or_else(|| FrontendError::UnknownStatement {
        line: line_no,
        text: line.to_string(),
    })?;
    let lhs = lhs.trim();
    let rhs = rhs.trim();

    let malformed = |reason: &str| FrontendError::MalformedStatement {
        line: line_no,
        reason: reason.to_string(),
    };

    if let Some(ptr) = lhs.strip_prefix('*') {
        let ptr = ptr.trim();
        if ptr.is_empty() || rhs.is_empty() {
            return Err(malformed("store requires a pointer and a value operand"));
        }
        return Ok(Statement::Store { ptr: ptr.to_string(), value: rhs.to_string() });
    }

    if lhs.is_empty() {
        return Err(malformed("missing assignment target"));
    }

    if let Some(src) = rhs.strip_prefix('&') {
        let src = src.trim();
        if src.is_empty() {
            return Err(malformed("address-of requires an operand"));
        }
        return Ok(Statement::Addr { dst: lhs.to_string(), src: src.to_string() });
    }

    if let Some(ptr) = rhs.strip_prefix('*') {
        let ptr = ptr.trim();
        if ptr.is_empty() {
            return Err(malformed("load requires a pointer operand"));
        }
        return Ok(Statement::Load { dst: lhs.to_string(), ptr: ptr.to_string() });
    }

    if rhs.is_empty() {
        return Err(malformed("copy requires a source operand"));
    }
    Ok(Statement::Copy { dst: lhs.to_string(), src: rhs.to_string() })
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum JsonStatement {
    Addr { dst: String, src: String },
    Copy { dst: String, src: String },
    Store { ptr: String, value: String },
    Load { dst: String, ptr: String },
}

#[derive(Debug, Deserialize)]
struct JsonProgram {
    statements: Vec<JsonStatement>,
}

/// Parse the JSON PAG form (`{"statements": [...]}`) into an unsaturated
/// [`LabeledGraph`].
pub fn parse_json(input: &str) -> Result<LabeledGraph, FrontendError> {
    let program: JsonProgram = serde_json::from_str(input)?;
    let statements: Vec<Statement> = program
        .statements
        .into_iter()
        .map(|s| match s {
            JsonStatement::Addr { dst, src } => Statement::Addr { dst, src },
            JsonStatement::Copy { dst, src } => Statement::Copy { dst, src },
            JsonStatement::Store { ptr, value } => Statement::Store { ptr, value },
            JsonStatement::Load { dst, ptr } => Statement::Load { dst, ptr },
        })
        .collect();
    Ok(build_graph(&statements))
}

/// Resolve operand names to dense ids and lower each statement to its
/// terminal-labeled edges. A `Copy` always gets its `CopyBar` inverse
/// synthesized here (the frontend's responsibility, same as `AddrBar`
/// never needing a matching `Addr` edge — see `DESIGN.md`).
fn build_graph(statements: &[Statement]) -> LabeledGraph {
    let mut table = NodeTable::default();
    let mut graph = LabeledGraph::new();

    for stmt in statements {
        match stmt {
            Statement::Addr { dst, src } => {
                let dst = table.resolve(dst);
                let src = table.resolve(src);
                graph.add_edge(dst, src, EdgeLabel::AddrBar);
            }
            Statement::Copy { dst, src } => {
                let dst = table.resolve(dst);
                let src = table.resolve(src);
                graph.add_edge(src, dst, EdgeLabel::Copy);
                graph.add_edge(dst, src, EdgeLabel::CopyBar);
            }
            Statement::Store { ptr, value } => {
                let ptr = table.resolve(ptr);
                let value = table.resolve(value);
                graph.add_edge(value, ptr, EdgeLabel::Store);
            }
            Statement::Load { dst, ptr } => {
                let dst = table.resolve(dst);
                let ptr = table.resolve(ptr);
                graph.add_edge(ptr, dst, EdgeLabel::Load);
            }
        }
    }

    graph
}
