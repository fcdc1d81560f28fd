use crate::feature::Chirality;

/// One atom of the molecular graph, indexed in parse order.
///
/// Fields that the source may leave unwritten are `Option`s, with the
/// exception of `charge`, where 0 doubles as "not written".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Atom {
    /// Atomic number; 0 for the wildcard `*`.
    pub atomic_number: u8,
    /// The symbol exactly as written (`C`, `Cl`, `c`, `*`).
    pub symbol: String,
    /// Mass number from a bracket atom.
    pub isotope: Option<u32>,
    pub charge: i8,
    /// Explicit hydrogen count from a bracket atom.
    pub hcount: Option<u8>,
    /// Hydrogen count derived from the standard valences. Assigned to
    /// organic-subset atoms after parsing; `None` for all others.
    pub implicit_hcount: Option<u8>,
    pub bracket: bool,
    pub organic: bool,
    pub aromatic: bool,
    pub chirality: Option<Chirality>,
    pub atom_class: Option<u32>,
    /// Byte offset of the atom in the source.
    pub pos: usize,
    /// Byte width of the atom in the source, brackets included.
    pub len: usize,
}
