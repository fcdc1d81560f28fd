use crate::graph::{Atom, Bond};

/// Standard valences by atomic number, lowest first.
const STANDARD_VALENCES: [(u8, &[u32]); 10] = [
    (5, &[3]),
    (6, &[4]),
    (7, &[3, 5]),
    (8, &[2]),
    (9, &[1]),
    (15, &[3, 5]),
    (16, &[2, 4, 6]),
    (17, &[1]),
    (35, &[1]),
    (53, &[1]),
];

/// Assigns implicit hydrogen counts to all atoms that were written with the
/// organic-subset shorthand. Expects `bonds` sorted by `(a0, a1)`.
pub(crate) fn assign_implicit_hydrogens(atoms: &mut [Atom], bonds: &[Bond]) {
    for index in 0..atoms.len() {
        if !atoms[index].organic {
            continue;
        }

        let valence = valence(index, atoms[index].aromatic, bonds);
        let standard = round_valence(atoms[index].atomic_number, valence, atoms[index].aromatic);

        atoms[index].implicit_hcount = Some(match standard {
            Some(standard) => (standard - valence) as u8,
            None => 0,
        });
    }
}

/// Sums the orders of the bonds incident on the atom at `index`. An
/// aromatic atom all of whose bonds contribute an order of one gets an
/// extra electron's worth of valence.
fn valence(index: usize, aromatic: bool, bonds: &[Bond]) -> u32 {
    let mut sum = 0;
    let mut neighbors = 0;

    for bond in bonds {
        if bond.a0 > index {
            break;
        }

        if bond.a0 != index && bond.a1 != index {
            continue;
        }

        sum += u32::from(bond.order.multiplicity());
        neighbors += 1;
    }

    if aromatic && sum == neighbors {
        sum + 1
    } else {
        sum
    }
}

/// Rounds a valence up to the element's next standard valence, returning it
/// unchanged when it is already standard. With `lowest_only` the search
/// stops at the element's lowest standard valence.
fn round_valence(atomic_number: u8, valence: u32, lowest_only: bool) -> Option<u32> {
    for (number, valences) in STANDARD_VALENCES {
        if number > atomic_number {
            break;
        }

        if number != atomic_number {
            continue;
        }

        for &standard in valences {
            if valence <= standard {
                return Some(standard);
            }

            if lowest_only {
                break;
            }
        }
    }

    None
}


#[cfg(test)]
mod assign {
    use super::*;
    use crate::feature::{BondOrder, Stereo};
    use pretty_assertions::assert_eq;

    fn organic(atomic_number: u8, aromatic: bool) -> Atom {
        Atom {
            atomic_number,
            organic: true,
            aromatic,
            ..Atom::default()
        }
    }

    fn bond(a0: usize, a1: usize, order: BondOrder) -> Bond {
        Bond {
            a0,
            a1,
            order,
            stereo: Stereo::Unspecified,
            implicit: false,
            ring: false,
            pos: 0,
            len: 0,
        }
    }

    #[test]
    fn lone_carbon() {
        let mut atoms = vec![organic(6, false)];

        assign_implicit_hydrogens(&mut atoms, &[]);

        assert_eq!(atoms[0].implicit_hcount, Some(4))
    }

    #[test]
    fn bracket_atom_is_skipped() {
        let mut atoms = vec![Atom {
            atomic_number: 6,
            bracket: true,
            ..Atom::default()
        }];

        assign_implicit_hydrogens(&mut atoms, &[]);

        assert_eq!(atoms[0].implicit_hcount, None)
    }

    #[test]
    fn single_bond() {
        let mut atoms = vec![organic(6, false), organic(8, false)];
        let bonds = vec![bond(0, 1, BondOrder::Single)];

        assign_implicit_hydrogens(&mut atoms, &bonds);

        assert_eq!(atoms[0].implicit_hcount, Some(3));
        assert_eq!(atoms[1].implicit_hcount, Some(1))
    }

    #[test]
    fn triple_bond() {
        let mut atoms = vec![organic(7, false), organic(7, false)];
        let bonds = vec![bond(0, 1, BondOrder::Triple)];

        assign_implicit_hydrogens(&mut atoms, &bonds);

        assert_eq!(atoms[0].implicit_hcount, Some(0));
        assert_eq!(atoms[1].implicit_hcount, Some(0))
    }

    #[test]
    fn aromatic_ring_member() {
        // Two aromatic bonds, as inside a benzene ring.
        let mut atoms = vec![organic(6, true), organic(6, true), organic(6, true)];
        let bonds = vec![
            bond(0, 1, BondOrder::Aromatic),
            bond(0, 2, BondOrder::Aromatic),
        ];

        assign_implicit_hydrogens(&mut atoms, &bonds);

        assert_eq!(atoms[0].implicit_hcount, Some(1))
    }

    #[test]
    fn overbonded_gets_zero() {
        let mut atoms = vec![organic(6, false), organic(6, false), organic(6, false)];
        let bonds = vec![
            bond(0, 1, BondOrder::Quadruple),
            bond(0, 2, BondOrder::Double),
        ];

        assign_implicit_hydrogens(&mut atoms, &bonds);

        assert_eq!(atoms[0].implicit_hcount, Some(0))
    }
}
