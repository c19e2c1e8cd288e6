//! The fixed CFL-R grammar over edge labels (Andersen store/load closure)
//!
//! Read left-to-right as "concatenation of labels on a path":
//!
//! Unary:  `AddrBar -> PT`
//! Binary: `CopyBar . PT -> PT`, `Store . PT -> PV`,
//!         `PTBar . Load -> VP`, `PV . VP -> Copy`
//!
//! Starting from `AddrBar` edges `p -> a`, the unary rule seeds `PT`. The
//! `CopyBar . PT -> PT` rule propagates points-to across copy chains. The
//! remaining three rules encode the classical Andersen store/load closure:
//! a value stored into a pointed-to object (`PV`), loaded back out of that
//! object (`VP`), becomes a copy from the original source to the load
//! destination; new copies feed back into the second rule. This is the
//! standard cubic Andersen analysis expressed as CFL-R.

use crate::graph::EdgeLabel;

/// `(other_label, result_label)` — used when the current edge is the LEFT
/// operand of a binary production, matched against `successors(_, other_label)`.
pub type RightMatch = (EdgeLabel, EdgeLabel);

/// `(other_label, result_label)` — used when the current edge is the RIGHT
/// operand of a binary production, matched against `predecessors(_, other_label)`.
pub type LeftMatch = (EdgeLabel, EdgeLabel);

/// The grammar consulted by [`crate::solver::Solver`]. Stateless: every
/// method is a pure function of the fixed production set.
#[derive(Debug, Default, Clone, Copy)]
pub struct Grammar;

impl Grammar {
    pub fn new() -> Self {
        Self
    }

    /// The single unary production: `AddrBar -> PT`.
    pub fn unary(self, label: EdgeLabel) -> Option<EdgeLabel> {
        match label {
            EdgeLabel::AddrBar => Some(EdgeLabel::PT),
            _ => None,
        }
    }

    /// Productions where `label` is the left operand: `(right, result)`
    /// pairs to probe against `successors`.
    pub fn right_matches(self, label: EdgeLabel) -> &'static [RightMatch] {
        match label {
            EdgeLabel::CopyBar => &[(EdgeLabel::PT, EdgeLabel::PT)],
            EdgeLabel::Store => &[(EdgeLabel::PT, EdgeLabel::PV)],
            EdgeLabel::PTBar => &[(EdgeLabel::Load, EdgeLabel::VP)],
            EdgeLabel::PV => &[(EdgeLabel::VP, EdgeLabel::Copy)],
            _ => &[],
        }
    }

    /// Productions where `label` is the right operand: `(left, result)`
    /// pairs to probe against `predecessors`.
    pub fn left_matches(self, label: EdgeLabel) -> &'static [LeftMatch] {
        match label {
            EdgeLabel::PT => &[
                (EdgeLabel::CopyBar, EdgeLabel::PT),
                (EdgeLabel::Store, EdgeLabel::PV),
            ],
            EdgeLabel::Load => &[(EdgeLabel::PTBar, EdgeLabel::VP)],
            EdgeLabel::VP => &[(EdgeLabel::PV, EdgeLabel::Copy)],
            _ => &[],
        }
    }
}
