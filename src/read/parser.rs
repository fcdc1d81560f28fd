use super::error::ReadError;
use super::hydrogens::assign_implicit_hydrogens;
use super::lexer::lex;
use super::token::{Category, Token};
use crate::feature::{BondOrder, Chirality, Rnum, Stereo};
use crate::graph::{Atom, Bond};

/// A reusable OpenSMILES parser.
///
/// Each call to [`parse`](Parser::parse) replaces the previous atom and bond
/// lists, which stay readable until then. Bonds come out sorted by their
/// endpoint pair, with `a0 < a1` and no duplicates.
///
/// ```
/// use smirk::feature::BondOrder;
/// use smirk::read::{Parser, ReadError};
///
/// fn main() -> Result<(), ReadError> {
///     let mut parser = Parser::new();
///
///     parser.parse("C(=O)O")?;
///
///     assert_eq!(parser.atoms().len(), 3);
///     assert_eq!(parser.bonds()[0].order, BondOrder::Double);
///     assert_eq!(parser.bonds()[1].order, BondOrder::Single);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Parser {
    pos: usize,
    end: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    rbonds: [Option<RingBond>; 100],
    open_ring_closures: usize,
    paren_stack: Vec<Paren>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    AtomRead,
    BondRead,
    DotRead,
    OpenParenRead,
    CloseParenRead,
}

/// Bond held open from the most recent atom to whatever follows it.
#[derive(Debug, Clone, Copy)]
struct Pending {
    a0: Option<usize>,
    order: BondOrder,
    stereo: Stereo,
    implicit: bool,
    pos: usize,
    len: usize,
}

impl Pending {
    fn new() -> Self {
        Self {
            a0: None,
            order: BondOrder::Unspecified,
            stereo: Stereo::Unspecified,
            implicit: false,
            pos: 0,
            len: 0,
        }
    }
}

/// The opening half of a ring closure, parked in the ring-bond table until
/// its number appears a second time.
#[derive(Debug, Clone, Copy)]
struct RingBond {
    a0: usize,
    order: BondOrder,
    stereo: Stereo,
    pos: usize,
    len: usize,
}

/// Branch context saved at `(`: the bond that was open to the atom before
/// the parenthesis, plus the position of the `(` for diagnostics.
#[derive(Debug, Clone, Copy)]
struct Paren {
    pos: usize,
    bond: Pending,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            pos: 0,
            end: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            rbonds: [None; 100],
            open_ring_closures: 0,
            paren_stack: Vec::new(),
        }
    }

    /// The atoms of the last parse, in the order they were written.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// The bonds of the last parse, sorted by `(a0, a1)`.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Parses one SMILES string, replacing the previous atom and bond
    /// lists. After an error the lists hold whatever had been assembled up
    /// to that point and should not be relied on.
    pub fn parse(&mut self, smi: &str) -> Result<(), ReadError> {
        if smi.len() > i32::MAX as usize {
            return Err(ReadError::TooLong);
        }

        self.reset(smi.len());

        let mut state = State::Init;
        let mut pending = Pending::new();
        let mut last_atom = 0;

        loop {
            let eos = self.pos == self.end;

            match state {
                State::Init => {
                    if eos {
                        return Err(ReadError::syntax("empty SMILES", self.pos));
                    }

                    match self.atom_ringbond(smi)? {
                        Some(anum) => last_atom = anum,
                        None => return Err(ReadError::syntax("atom expected", self.pos)),
                    }

                    state = State::AtomRead;
                }
                State::AtomRead => {
                    if let Some(a0) = pending.a0 {
                        self.finish_bond(&pending, a0, last_atom)?;
                    }

                    // The atom just read may bond to whatever follows.
                    pending = Pending {
                        a0: Some(last_atom),
                        implicit: true,
                        pos: self.pos,
                        ..Pending::new()
                    };

                    if eos {
                        break;
                    }

                    if let Some(anum) = self.atom_ringbond(smi)? {
                        last_atom = anum;
                    } else if self.bond(smi, &mut pending) {
                        state = State::BondRead;
                    } else if self.dot(smi) {
                        state = State::DotRead;
                    } else if self.open_paren(smi, &pending)? {
                        state = State::OpenParenRead;
                    } else if self.close_paren(smi, &mut pending)? {
                        state = State::CloseParenRead;
                    } else {
                        return Err(ReadError::syntax("unexpected character", self.pos));
                    }
                }
                State::BondRead => {
                    match self.atom_ringbond(smi)? {
                        Some(anum) => last_atom = anum,
                        None => return Err(ReadError::syntax("atom must follow bond", self.pos)),
                    }

                    state = State::AtomRead;
                }
                State::DotRead => {
                    // The dot cancels the bond to the previous atom.
                    pending.a0 = None;

                    match self.atom_ringbond(smi)? {
                        Some(anum) => last_atom = anum,
                        None => return Err(ReadError::syntax("atom must follow dot", self.pos)),
                    }

                    state = State::AtomRead;
                }
                State::OpenParenRead => {
                    if eos {
                        return Err(ReadError::syntax("unbalanced parenthesis", self.pos - 1));
                    }

                    if let Some(anum) = self.atom_ringbond(smi)? {
                        last_atom = anum;
                        state = State::AtomRead;
                    } else if self.bond(smi, &mut pending) {
                        state = State::BondRead;
                    } else if self.dot(smi) {
                        state = State::DotRead;
                    } else {
                        return Err(ReadError::syntax("atom, bond, or dot expected", self.pos));
                    }
                }
                State::CloseParenRead => {
                    if eos {
                        break;
                    }

                    if let Some(anum) = self.atom_ringbond(smi)? {
                        last_atom = anum;
                        state = State::AtomRead;
                    } else if self.bond(smi, &mut pending) {
                        state = State::BondRead;
                    } else if self.dot(smi) {
                        state = State::DotRead;
                    } else if self.open_paren(smi, &pending)? {
                        state = State::OpenParenRead;
                    } else if self.close_paren(smi, &mut pending)? {
                        state = State::CloseParenRead;
                    } else {
                        return Err(ReadError::syntax("unexpected character", self.pos));
                    }
                }
            }
        }

        debug_assert_eq!(self.pos, self.end);
        self.check_ring_closures()?;

        if let Some(paren) = self.paren_stack.first() {
            return Err(ReadError::syntax("unbalanced parenthesis", paren.pos));
        }

        assign_implicit_hydrogens(&mut self.atoms, &self.bonds);
        Ok(())
    }

    fn reset(&mut self, end: usize) {
        self.pos = 0;
        self.end = end;
        self.atoms.clear();
        self.bonds.clear();
        self.paren_stack.clear();
        self.rbonds = [None; 100];
        self.open_ring_closures = 0;
    }

    /// Consumes the next token if its categories intersect `category`,
    /// leaving the position untouched otherwise.
    fn accept<'s>(&mut self, smi: &'s str, inbracket: bool, category: Category) -> Option<Token<'s>> {
        let token = lex(smi, self.pos, inbracket)?;

        if token.category.intersects(category) {
            self.pos += token.len();
            Some(token)
        } else {
            None
        }
    }

    // atom ::= bracket_atom | aliphatic_organic | aromatic_organic | '*'
    fn atom(&mut self, smi: &str) -> Result<Option<usize>, ReadError> {
        let atom = if let Some(atom) = self.bracket_atom(smi)? {
            atom
        } else if let Some(atom) = self.aliphatic_organic(smi) {
            atom
        } else if let Some(atom) = self.aromatic_organic(smi) {
            atom
        } else if let Some(atom) = self.wildcard(smi) {
            atom
        } else {
            return Ok(None);
        };

        self.add_atom(atom).map(Some)
    }

    // atom_ringbond ::= atom ringbond*
    fn atom_ringbond(&mut self, smi: &str) -> Result<Option<usize>, ReadError> {
        let Some(anum) = self.atom(smi)? else {
            return Ok(None);
        };

        while self.ring_bond(smi, anum)? {}

        Ok(Some(anum))
    }

    fn aliphatic_organic(&mut self, smi: &str) -> Option<Atom> {
        let token = self.accept(smi, false, Category::ALIPHATIC_ORGANIC)?;

        Some(Atom {
            atomic_number: token.value as u8,
            symbol: token.text.to_owned(),
            organic: true,
            pos: token.pos,
            len: token.len(),
            ..Atom::default()
        })
    }

    fn aromatic_organic(&mut self, smi: &str) -> Option<Atom> {
        let token = self.accept(smi, false, Category::AROMATIC_ORGANIC)?;

        Some(Atom {
            atomic_number: token.value as u8,
            symbol: token.text.to_owned(),
            organic: true,
            aromatic: true,
            pos: token.pos,
            len: token.len(),
            ..Atom::default()
        })
    }

    fn wildcard(&mut self, smi: &str) -> Option<Atom> {
        let token = self.accept(smi, false, Category::WILDCARD)?;

        Some(Atom {
            symbol: token.text.to_owned(),
            pos: token.pos,
            len: token.len(),
            ..Atom::default()
        })
    }

    // bracket_atom ::= '[' isotope? symbol chirality? hcount? charge? class? ']'
    fn bracket_atom(&mut self, smi: &str) -> Result<Option<Atom>, ReadError> {
        let Some(open) = self.accept(smi, false, Category::BRACKET_OPEN) else {
            return Ok(None);
        };

        let mut atom = Atom {
            bracket: true,
            pos: open.pos,
            len: open.len(),
            ..Atom::default()
        };

        self.isotope(smi, &mut atom)?;

        if !self.symbol(smi, &mut atom) {
            return Err(ReadError::syntax("atom symbol expected", self.pos));
        }

        self.chirality(smi, &mut atom);
        self.hcount(smi, &mut atom);
        self.charge(smi, &mut atom)?;
        self.atom_class(smi, &mut atom)?;

        let Some(close) = self.accept(smi, false, Category::BRACKET_CLOSE) else {
            return Err(ReadError::syntax("bracket atom syntax error", self.pos));
        };

        atom.len += close.len();
        Ok(Some(atom))
    }

    // isotope ::= NUMBER, up to 5 digits
    fn isotope(&mut self, smi: &str, atom: &mut Atom) -> Result<(), ReadError> {
        let start = self.pos;

        match self.integer(smi, 5) {
            Err(Overflow) => Err(ReadError::syntax("isotope too large", self.pos)),
            Ok(None) => Ok(()),
            Ok(Some(value)) => {
                atom.isotope = Some(value);
                atom.len += self.pos - start;
                Ok(())
            }
        }
    }

    // symbol ::= element_symbols | aromatic_symbols | '*'
    fn symbol(&mut self, smi: &str, atom: &mut Atom) -> bool {
        let Some(token) = self.accept(
            smi,
            true,
            Category::ELEMENT | Category::AROMATIC | Category::WILDCARD,
        ) else {
            return false;
        };

        atom.atomic_number = token.value as u8;
        atom.aromatic = token.category.intersects(Category::AROMATIC);
        atom.symbol = token.text.to_owned();
        atom.len += token.len();
        true
    }

    /// Only the bare `@` and `@@` markers are understood.
    fn chirality(&mut self, smi: &str, atom: &mut Atom) -> bool {
        let Some(token) = self.accept(smi, true, Category::CHIRALITY) else {
            return false;
        };

        atom.chirality = Some(if token.len() == 2 {
            Chirality::Clockwise
        } else {
            Chirality::Anticlockwise
        });
        atom.len += token.len();
        true
    }

    // hcount ::= 'H' DIGIT?
    fn hcount(&mut self, smi: &str, atom: &mut Atom) -> bool {
        let Some(hydrogen) = self.accept(smi, true, Category::HYDROGEN) else {
            return false;
        };

        atom.len += hydrogen.len();

        if let Some(digit) = self.accept(smi, true, Category::DIGIT) {
            atom.hcount = Some(digit.value as u8);
            atom.len += digit.len();
        } else {
            atom.hcount = Some(1);
        }

        true
    }

    // charge ::= ('+' | '-') ( DIGIT? DIGIT )?
    // The deprecated doubled forms `++` and `--` still read as +2 and -2.
    fn charge(&mut self, smi: &str, atom: &mut Atom) -> Result<bool, ReadError> {
        let Some(sign_token) = self.accept(smi, true, Category::PLUS | Category::MINUS) else {
            return Ok(false);
        };

        let sign = sign_token.value;
        let mut len = sign_token.len();
        let start = self.pos;

        match self.integer(smi, 2) {
            Err(Overflow) => return Err(ReadError::syntax("charge too large", self.pos)),
            Ok(Some(value)) => {
                atom.charge = (value as i32 * sign) as i8;
                len += self.pos - start;
            }
            Ok(None) => {
                atom.charge = sign as i8;

                if let Some(token) = lex(smi, self.pos, true) {
                    if token.category.intersects(Category::PLUS | Category::MINUS)
                        && token.value == sign
                    {
                        self.pos += token.len();
                        atom.charge *= 2;
                        len += token.len();
                    }
                }
            }
        }

        atom.len += len;
        Ok(true)
    }

    // class ::= ':' NUMBER, up to 8 digits
    fn atom_class(&mut self, smi: &str, atom: &mut Atom) -> Result<bool, ReadError> {
        let Some(colon) = self.accept(smi, true, Category::COLON) else {
            return Ok(false);
        };

        atom.len += colon.len();
        let start = self.pos;

        match self.integer(smi, 8) {
            Err(Overflow) => Err(ReadError::syntax("atom class too large", self.pos)),
            Ok(None) => Err(ReadError::syntax("atom class expected", self.pos)),
            Ok(Some(value)) => {
                atom.atom_class = Some(value);
                atom.len += self.pos - start;
                Ok(true)
            }
        }
    }

    /// Reads a run of digits at most `max_digits` long. A longer run
    /// restores the starting position and reports [`Overflow`], so the
    /// caller's error lands on the first digit.
    fn integer(&mut self, smi: &str, max_digits: usize) -> Result<Option<u32>, Overflow> {
        let saved = self.pos;
        let mut value: u32 = 0;
        let mut count = 0;

        while let Some(token) = lex(smi, self.pos, false) {
            if !token.category.intersects(Category::DIGIT) {
                break;
            }

            if count == max_digits {
                self.pos = saved;
                return Err(Overflow);
            }

            self.pos += token.len();
            value = value * 10 + token.value as u32;
            count += 1;
        }

        if count == 0 {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    // bond ::= '-' | '=' | '#' | '$' | ':' | '/' | '\'
    fn bond(&mut self, smi: &str, pending: &mut Pending) -> bool {
        let Some(token) = self.accept(smi, false, Category::BOND) else {
            return false;
        };

        pending.order = token.order;
        pending.stereo = token.stereo;
        pending.implicit = false;
        pending.pos = token.pos;
        pending.len = token.len();
        true
    }

    fn dot(&mut self, smi: &str) -> bool {
        self.accept(smi, false, Category::DOT).is_some()
    }

    fn open_paren(&mut self, smi: &str, pending: &Pending) -> Result<bool, ReadError> {
        let Some(token) = self.accept(smi, false, Category::PAREN_OPEN) else {
            return Ok(false);
        };

        debug_assert!(pending.a0.is_some());
        reserve(&mut self.paren_stack)?;
        self.paren_stack.push(Paren {
            pos: token.pos,
            bond: *pending,
        });
        Ok(true)
    }

    /// Restores the bond that was open before the matching `(`, so the next
    /// atom attaches to the atom the branch grew from.
    fn close_paren(&mut self, smi: &str, pending: &mut Pending) -> Result<bool, ReadError> {
        let Some(token) = self.accept(smi, false, Category::PAREN_CLOSE) else {
            return Ok(false);
        };

        match self.paren_stack.pop() {
            Some(paren) => {
                *pending = paren.bond;
                Ok(true)
            }
            None => Err(ReadError::syntax("unbalanced parenthesis", token.pos)),
        }
    }

    // ringbond ::= bond? DIGIT | bond? '%' DIGIT DIGIT
    fn ring_bond(&mut self, smi: &str, anum: usize) -> Result<bool, ReadError> {
        let saved = self.pos;
        let mut half = Pending::new();

        if !self.bond(smi, &mut half) {
            half.order = BondOrder::Unspecified;
            half.pos = self.pos;
        }

        let Some(token) = self.accept(smi, false, Category::PERCENT | Category::DIGIT) else {
            self.pos = saved;
            return Ok(false);
        };

        let rnum = if token.category.intersects(Category::PERCENT) {
            let Some(tens) = self.accept(smi, false, Category::DIGIT) else {
                return Err(ReadError::syntax("ring bond expected", self.pos));
            };

            let Some(ones) = self.accept(smi, false, Category::DIGIT) else {
                return Err(ReadError::syntax("2 digit ring bond expected", self.pos));
            };

            Rnum::new((tens.value * 10 + ones.value) as u8)
        } else {
            Rnum::new(token.value as u8)
        };

        self.add_ring_bond(
            rnum,
            RingBond {
                a0: anum,
                order: half.order,
                stereo: half.stereo,
                pos: half.pos,
                len: half.len,
            },
        )?;
        Ok(true)
    }

    /// Opens the ring bond `rnum` or, if its slot is already occupied,
    /// closes it and inserts the resulting bond. The opening half supplies
    /// the direction and the position; an order given on exactly one side
    /// wins, and orders given on both sides must agree.
    fn add_ring_bond(&mut self, rnum: Rnum, half: RingBond) -> Result<(), ReadError> {
        let slot = &mut self.rbonds[rnum.index()];

        let Some(open) = slot.take() else {
            *slot = Some(half);
            self.open_ring_closures += 1;
            return Ok(());
        };

        if open.a0 == half.a0 {
            return Err(ReadError::syntax(
                "Atom ring-bonded to itself",
                self.atoms[half.a0].pos,
            ));
        }

        let order = match (open.order, half.order) {
            (BondOrder::Unspecified, order) | (order, BondOrder::Unspecified) => order,
            (open_order, close_order) if open_order == close_order => open_order,
            _ => {
                return Err(ReadError::syntax(
                    "conflicting ring bond orders",
                    self.atoms[half.a0].pos,
                ))
            }
        };

        let order = if order == BondOrder::Unspecified {
            if self.atoms[open.a0].aromatic && self.atoms[half.a0].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        } else {
            order
        };

        self.add_bond(Bond {
            a0: open.a0,
            a1: half.a0,
            order,
            stereo: open.stereo,
            implicit: false,
            ring: true,
            pos: open.pos,
            len: open.len,
        })?;
        self.open_ring_closures -= 1;
        Ok(())
    }

    /// Completes the bond held open to the previous atom. Elided bonds
    /// become aromatic when both endpoints are aromatic, single otherwise.
    fn finish_bond(&mut self, pending: &Pending, a0: usize, a1: usize) -> Result<(), ReadError> {
        let order = if pending.implicit {
            if self.atoms[a0].aromatic && self.atoms[a1].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        } else {
            pending.order
        };

        self.add_bond(Bond {
            a0,
            a1,
            order,
            stereo: pending.stereo,
            implicit: pending.implicit,
            ring: false,
            pos: pending.pos,
            len: pending.len,
        })
    }

    /// Inserts a bond, keeping the list sorted by `(a0, a1)`. Endpoints are
    /// swapped first if needed, inverting the direction to match. Since
    /// bonds arrive in nearly sorted order, the insertion point is found by
    /// scanning back from the end.
    fn add_bond(&mut self, bond: Bond) -> Result<(), ReadError> {
        let mut bond = bond;

        if bond.a0 > bond.a1 {
            std::mem::swap(&mut bond.a0, &mut bond.a1);
            bond.stereo = bond.stereo.flipped();
        }

        let mut index = self.bonds.len();

        while index > 0 {
            let prev = &self.bonds[index - 1];

            match (bond.a0, bond.a1).cmp(&(prev.a0, prev.a1)) {
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => index -= 1,
                std::cmp::Ordering::Equal => {
                    return Err(ReadError::syntax("duplicate bond", bond.pos))
                }
            }
        }

        reserve(&mut self.bonds)?;
        self.bonds.insert(index, bond);
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom) -> Result<usize, ReadError> {
        reserve(&mut self.atoms)?;
        self.atoms.push(atom);
        Ok(self.atoms.len() - 1)
    }

    fn check_ring_closures(&self) -> Result<(), ReadError> {
        if self.open_ring_closures == 0 {
            return Ok(());
        }

        let pos = self
            .rbonds
            .iter()
            .flatten()
            .next()
            .map_or(self.pos, |open| open.pos);

        Err(ReadError::syntax("unclosed ring bond", pos))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// A digit run exceeded its caller's limit.
struct Overflow;

fn reserve<T>(vec: &mut Vec<T>) -> Result<(), ReadError> {
    vec.try_reserve(1).map_err(|_| ReadError::OutOfMemory)
}




#[cfg(test)]
mod add_bond {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bond(a0: usize, a1: usize, stereo: Stereo) -> Bond {
        Bond {
            a0,
            a1,
            order: BondOrder::Single,
            stereo,
            implicit: false,
            ring: false,
            pos: 0,
            len: 1,
        }
    }

    #[test]
    fn swaps_reversed_endpoints_and_flips_direction() {
        let mut parser = Parser::new();

        parser.add_bond(bond(1, 0, Stereo::Up)).unwrap();

        assert_eq!((parser.bonds()[0].a0, parser.bonds()[0].a1), (0, 1));
        assert_eq!(parser.bonds()[0].stereo, Stereo::Down);

        let mut parser = Parser::new();

        parser.add_bond(bond(2, 0, Stereo::Down)).unwrap();

        assert_eq!(parser.bonds()[0].stereo, Stereo::Up)
    }

    #[test]
    fn keeps_list_sorted() {
        let mut parser = Parser::new();

        parser.add_bond(bond(1, 2, Stereo::Unspecified)).unwrap();
        parser.add_bond(bond(0, 3, Stereo::Unspecified)).unwrap();
        parser.add_bond(bond(0, 1, Stereo::Unspecified)).unwrap();

        let pairs: Vec<_> = parser.bonds().iter().map(|b| (b.a0, b.a1)).collect();

        assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 2)])
    }

    #[test]
    fn rejects_duplicates() {
        let mut parser = Parser::new();

        parser.add_bond(bond(0, 1, Stereo::Unspecified)).unwrap();

        assert_eq!(
            parser.add_bond(bond(1, 0, Stereo::Unspecified)),
            Err(ReadError::syntax("duplicate bond", 0))
        )
    }
}
