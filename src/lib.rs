//! Parser for the [Simplified Molecular Input Line Entry System](https://en.wikipedia.org/wiki/Simplified_molecular-input_line-entry_system)
//! (SMILES) line notation, as specified by [OpenSMILES](http://opensmiles.org).
//!
//! A [`read::Parser`] turns a SMILES string into an indexed list of atoms and
//! an indexed, sorted list of bonds, reporting the byte offset of the
//! offending character when the input is malformed. Atoms written with the
//! organic-subset shorthand additionally receive an implicit hydrogen count
//! derived from the standard valences.

/// Small value types shared between the lexer and the molecular graph.
pub mod feature;
/// Atoms and bonds produced by a parse.
pub mod graph;
/// Reading SMILES representations from strings.
pub mod read;

pub use mendeleev::Element;

mod doctests {
    #[cfg(doctest)]
    #[doc = include_str!("../README.md")]
    struct _ReadMe;
}
