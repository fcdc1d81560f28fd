use crate::feature::{BondOrder, Stereo};

/// One bond of the molecular graph.
///
/// The endpoints always satisfy `a0 < a1`, and the bond list of a parse is
/// sorted by `(a0, a1)` with no duplicates. When a bond is stored with its
/// endpoints swapped, its direction is flipped to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a0: usize,
    pub a1: usize,
    pub order: BondOrder,
    pub stereo: Stereo,
    /// True when the bond was not written explicitly.
    pub implicit: bool,
    /// True when the bond arose from a ring-closure pair.
    pub ring: bool,
    /// Byte offset of the bond token or ring-closure digit.
    pub pos: usize,
    /// Byte width of the bond token; 0 for elided bonds.
    pub len: usize,
}
