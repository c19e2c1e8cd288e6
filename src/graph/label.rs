//! Edge label alphabet for the CFL-R pointer-analysis grammar

use serde::{Deserialize, Serialize};

/// Label carried by an edge of the labeled graph.
///
/// Terminal labels (`Addr`, `AddrBar`, `Store`, `Load`) are produced only by
/// the frontend; derived labels (`Copy`, `CopyBar`, `PT`, `PTBar`, `PV`, `VP`)
/// arise exclusively from grammar productions applied by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeLabel {
    /// terminal: `p = &a`, edge `p -> a`
    Addr,
    /// inverse of Addr; the only direction the solver actually consumes
    AddrBar,
    /// derived: value flows between two locations (`p = q`)
    Copy,
    /// inverse of Copy
    CopyBar,
    /// terminal: `*p = q`, edge `q -> p`
    Store,
    /// terminal: `r = *p`, edge `p -> r`
    Load,
    /// derived: points-to — source pointer references target object
    PT,
    /// inverse of PT
    PTBar,
    /// derived intermediate: value `u` has been stored into object `v`
    PV,
    /// derived intermediate: object `u` has been loaded into value `v`
    VP,
}

impl EdgeLabel {
    /// All ten labels, used to size and iterate over dual indices.
    pub const ALL: [EdgeLabel; 10] = [
        EdgeLabel::Addr,
        EdgeLabel::AddrBar,
        EdgeLabel::Copy,
        EdgeLabel::CopyBar,
        EdgeLabel::Store,
        EdgeLabel::Load,
        EdgeLabel::PT,
        EdgeLabel::PTBar,
        EdgeLabel::PV,
        EdgeLabel::VP,
    ];

    /// Syntactic inverse, where one exists. `Store`, `Load`, `PV`, `VP` have
    /// no required inverse and map to `None`.
    pub fn bar(self) -> Option<EdgeLabel> {
        match self {
            EdgeLabel::Addr => Some(EdgeLabel::AddrBar),
            EdgeLabel::AddrBar => Some(EdgeLabel::Addr),
            EdgeLabel::Copy => Some(EdgeLabel::CopyBar),
            EdgeLabel::CopyBar => Some(EdgeLabel::Copy),
            EdgeLabel::PT => Some(EdgeLabel::PTBar),
            EdgeLabel::PTBar => Some(EdgeLabel::PT),
            EdgeLabel::Store | EdgeLabel::Load | EdgeLabel::PV | EdgeLabel::VP => None,
        }
    }

    /// Short mnemonic used by the text frontend and the human/DOT renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeLabel::Addr => "Addr",
            EdgeLabel::AddrBar => "AddrBar",
            EdgeLabel::Copy => "Copy",
            EdgeLabel::CopyBar => "CopyBar",
            EdgeLabel::Store => "Store",
            EdgeLabel::Load => "Load",
            EdgeLabel::PT => "PT",
            EdgeLabel::PTBar => "PTBar",
            EdgeLabel::PV => "PV",
            EdgeLabel::VP => "VP",
        }
    }

    /// Edge color for DOT visualization, grouped by relation family.
    pub fn dot_color(self) -> &'static str {
        match self {
            EdgeLabel::Addr | EdgeLabel::AddrBar => "darkgreen",
            EdgeLabel::Copy | EdgeLabel::CopyBar => "blue",
            EdgeLabel::Store => "purple",
            EdgeLabel::Load => "orange",
            EdgeLabel::PT | EdgeLabel::PTBar => "red",
            EdgeLabel::PV | EdgeLabel::VP => "gray",
        }
    }
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
